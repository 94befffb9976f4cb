//! Page assignment — greedy whole-section packing with item-level splits.
//!
//! The algorithmic core of the engine. Consumes per-entity measurements and
//! the per-page content budget, and produces one document clone per page.
//! Whole sections land where they fit; a section that does not fit is split
//! item-by-item behind an orphan guard (a section title never ends a page
//! with no content under it), and its remainder continues on following
//! pages with the title suppressed.
//!
//! All comparisons run in the shared pixel basis from `geometry`, with a
//! small tolerance absorbing sub-pixel measurement rounding. Items are
//! never reordered and never skipped: the split point is always the first
//! item that does not fit.

use tracing::{debug, warn};

use crate::geometry;
use crate::measure::{DocumentMeasurements, SectionMeasurement};
use crate::models::{Document, Section};
use crate::paginate::partial::partial_section;

// ────────────────────────────────────────────────────────────────────────────
// Accumulator state
// ────────────────────────────────────────────────────────────────────────────

/// Accumulator for the page under construction, carried across sections.
/// An explicit struct (rather than locals in one long function) so the
/// per-section transition is unit testable without any rendering.
#[derive(Debug, Default)]
struct AssignState {
    pages: Vec<Vec<Section>>,
    current: Vec<Section>,
    current_height: f32,
}

impl AssignState {
    /// Page 1 starts with the personal-info header already committed.
    fn with_header(header_height: f32) -> Self {
        AssignState {
            pages: Vec::new(),
            current: Vec::new(),
            current_height: header_height,
        }
    }

    /// True when nothing has been committed to the page under construction
    /// — no sections and no header height.
    fn on_fresh_page(&self) -> bool {
        self.current.is_empty() && self.current_height == 0.0
    }

    fn commit(&mut self, section: Section, height: f32) {
        self.current.push(section);
        self.current_height += height;
    }

    /// Closes the page under construction and starts an empty one.
    fn flush(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.current_height = 0.0;
    }

    fn into_pages(mut self) -> Vec<Vec<Section>> {
        if !self.current.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Splits `document` into per-page documents using `measurements`.
///
/// Sections without a measurement (faulted or rendered empty) are excluded.
/// `tolerance_px` absorbs sub-pixel rounding in every fit comparison; keep
/// it small (default 2 px) so genuine overflow is never masked.
pub fn assign_pages(
    document: &Document,
    measurements: &DocumentMeasurements,
    tolerance_px: f32,
) -> Vec<Document> {
    let usable = geometry::usable_height_px(&document.layout);
    let mut state = AssignState::with_header(measurements.header_height);

    for section in document.enabled_sections() {
        let Some(m) = measurements.section(&section.id) else {
            continue;
        };
        place_section(&mut state, section, m, usable, tolerance_px);
    }

    let pages = state.into_pages();
    debug!(
        pages = pages.len(),
        usable_height = usable,
        faults = measurements.faults,
        "page assignment complete"
    );

    pages
        .into_iter()
        .enumerate()
        .map(|(i, sections)| document.page_with(sections, i == 0))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Per-section transition
// ────────────────────────────────────────────────────────────────────────────

/// Places one section into the accumulator.
fn place_section(
    state: &mut AssignState,
    section: &Section,
    m: &SectionMeasurement,
    usable: f32,
    tol: f32,
) {
    // 1. Whole-section fit test.
    if state.current_height + m.total_height <= usable + tol {
        state.commit(section.clone(), m.total_height);
        return;
    }

    // Scalar content and zero-item sections are never split: defer to a
    // fresh page wholesale and accept any overflow there.
    if !section.content.is_splittable() || m.items.is_empty() {
        if !state.on_fresh_page() {
            state.flush();
        }
        if m.total_height > usable + tol {
            warn!(
                section_id = %section.id,
                height = m.total_height,
                usable,
                "unsplittable section exceeds a full page; placing with overflow"
            );
        }
        state.commit(section.clone(), m.total_height);
        return;
    }

    // 2. Split required. Orphan guard: the title plus the first item must
    // fit, or nothing of the section lands on this page.
    let min_needed = m.title_cost() + m.items[0].outer_height();
    if state.current_height + min_needed > usable + tol && !state.on_fresh_page() {
        state.flush();
        // The fresh page may take the section whole — deferral, not a split.
        if m.total_height <= usable + tol {
            state.commit(section.clone(), m.total_height);
            return;
        }
    }

    // Walk items in order, accumulating the batch that fits under the
    // title. The split point is the first item that does not fit.
    let mut subtotal = m.title_cost();
    let mut fitting = 0usize;
    for item in &m.items {
        if state.current_height + subtotal + item.outer_height() <= usable + tol {
            subtotal += item.outer_height();
            fitting += 1;
        } else {
            break;
        }
    }

    if fitting == 0 {
        // Even a fresh page cannot hold the title plus the first item.
        // Force both rather than emit a title-less first placement.
        warn!(
            section_id = %section.id,
            item_height = m.items[0].outer_height(),
            usable,
            "first item exceeds a full page; forcing placement with overflow"
        );
        subtotal += m.items[0].outer_height();
        fitting = 1;
    }

    state.commit(partial_section(section, 0..fitting, false), subtotal);

    // 3. Continuation loop: remaining items flow onto fresh pages with the
    // title suppressed.
    let mut next = fitting;
    while next < m.items.len() {
        state.flush();

        let mut subtotal = 0.0f32;
        let mut end = next;
        while end < m.items.len() && subtotal + m.items[end].outer_height() <= usable + tol {
            subtotal += m.items[end].outer_height();
            end += 1;
        }

        if end == next {
            // Single item taller than a full page: force-place it alone.
            warn!(
                section_id = %section.id,
                item_index = next,
                item_height = m.items[next].outer_height(),
                usable,
                "item exceeds a full page; forcing lone placement with overflow"
            );
            subtotal = m.items[next].outer_height();
            end = next + 1;
        }

        state.commit(partial_section(section, next..end, true), subtotal);
        next = end;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
