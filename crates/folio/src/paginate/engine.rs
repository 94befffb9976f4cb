//! Pagination orchestrator — debounced render → measure → assign passes.
//!
//! # Architecture
//! - Document snapshots land in a watch channel; a quiet window collapses
//!   edit bursts so only the last snapshot triggers a pass.
//! - At most one pass is in flight. A snapshot arriving mid-pass supersedes
//!   the running pass instead of queueing behind it.
//! - Published results carry a monotonic pass number; a stale pass never
//!   overwrites a newer one.
//! - The CPU-bound assignment runs via `tokio::task::spawn_blocking` to
//!   keep the scheduler unblocked.
//! - On failure the previously published pages are retained and the busy
//!   flag resolves false. The mounted tree is dropped (and its off-screen
//!   resources released) on every exit path.

use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::measure::measure_document;
use crate::models::Document;
use crate::paginate::assign::assign_pages;
use crate::render::RenderSurface;

// ────────────────────────────────────────────────────────────────────────────
// Published state
// ────────────────────────────────────────────────────────────────────────────

/// The engine's published output: the latest page split plus a busy flag.
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// One document per page, in order. Empty until the first pass settles.
    pub pages: Vec<Document>,
    /// True from the moment a pass starts until it settles or fails.
    pub is_calculating: bool,
    /// Completion time of the pass that produced `pages`.
    pub computed_at: Option<DateTime<Utc>>,
    /// Monotonic pass number; later passes always carry larger values.
    pub pass: u64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handle
// ────────────────────────────────────────────────────────────────────────────

/// Handle to a running pagination worker.
pub struct Paginator {
    input: watch::Sender<Option<Document>>,
    output: watch::Receiver<PaginationState>,
    worker: JoinHandle<()>,
}

impl Paginator {
    /// Spawns the worker task. It idles until the first `submit`.
    pub fn spawn(surface: Arc<dyn RenderSurface>, config: EngineConfig) -> Self {
        let (input_tx, input_rx) = watch::channel(None);
        let (output_tx, output_rx) = watch::channel(PaginationState::default());
        let worker = tokio::spawn(worker_loop(input_rx, output_tx, surface, config));
        Paginator {
            input: input_tx,
            output: output_rx,
            worker,
        }
    }

    /// Submits a new document snapshot. Restarts the debounce window; only
    /// the last snapshot inside the window triggers a pass.
    pub fn submit(&self, document: Document) {
        // send only fails when the worker is gone; nothing left to notify.
        let _ = self.input.send(Some(document));
    }

    /// A receiver for published states: `borrow` for the latest, `changed`
    /// to await the next publication.
    pub fn subscribe(&self) -> watch::Receiver<PaginationState> {
        self.output.clone()
    }

    /// Latest published state.
    pub fn state(&self) -> PaginationState {
        self.output.borrow().clone()
    }

    /// Stops the worker. An in-flight pass is dropped; its mounted tree
    /// releases its resources on drop.
    pub fn shutdown(self) {
        self.worker.abort();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Worker
// ────────────────────────────────────────────────────────────────────────────

async fn worker_loop(
    mut input: watch::Receiver<Option<Document>>,
    output: watch::Sender<PaginationState>,
    surface: Arc<dyn RenderSurface>,
    config: EngineConfig,
) {
    let mut pass: u64 = 0;
    let mut pending = false;

    loop {
        if !pending && input.changed().await.is_err() {
            break; // all senders dropped
        }
        pending = false;

        // Debounce: every further change restarts the quiet window.
        loop {
            let timer = tokio::time::sleep(config.debounce);
            tokio::pin!(timer);
            tokio::select! {
                _ = &mut timer => break,
                changed = input.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        let Some(document) = input.borrow_and_update().clone() else {
            continue;
        };

        pass += 1;
        output.send_modify(|s| s.is_calculating = true);

        // The pass races the next document change: a change mid-pass
        // supersedes the running pass instead of queueing behind it.
        tokio::select! {
            result = run_pass(surface.as_ref(), &document, &config) => match result {
                Ok(pages) => publish(&output, pages, pass),
                Err(err) => {
                    warn!(pass, error = %err, "pagination pass failed; retaining previous pages");
                    output.send_modify(|s| s.is_calculating = false);
                }
            },
            changed = input.changed() => {
                if changed.is_err() {
                    break;
                }
                debug!(pass, "pagination pass superseded by newer document");
                pending = true;
            }
        }
    }
}

/// One full pass: mount, settle, measure, assign.
///
/// The mounted tree is dropped — and its off-screen resources released —
/// on every exit path, including each `?`.
async fn run_pass(
    surface: &dyn RenderSurface,
    document: &Document,
    config: &EngineConfig,
) -> Result<Vec<Document>, EngineError> {
    let tree = surface.mount(document).await?;
    tree.fonts_ready().await?;
    tokio::time::sleep(config.settle).await;

    let measurements = measure_document(tree.as_ref(), document);
    drop(tree);

    if measurements.faults > 0 {
        warn!(
            faults = measurements.faults,
            "sections missing from mounted tree this pass"
        );
    }

    // Assignment is CPU-bound; keep it off the async scheduler.
    let doc = document.clone();
    let tolerance = config.tolerance_px;
    let pages = tokio::task::spawn_blocking(move || assign_pages(&doc, &measurements, tolerance))
        .await
        .map_err(|e| EngineError::Internal(anyhow!("assignment task failed: {e}")))?;

    Ok(pages)
}

fn publish(output: &watch::Sender<PaginationState>, pages: Vec<Document>, pass: u64) {
    output.send_modify(|state| {
        // Latest wins: a stale pass never overwrites a newer result.
        if pass < state.pass {
            debug!(pass, newest = state.pass, "discarding stale pagination result");
            return;
        }
        state.pages = pages;
        state.is_calculating = false;
        state.computed_at = Some(Utc::now());
        state.pass = pass;
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
