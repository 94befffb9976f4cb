use thiserror::Error;

/// Errors raised by a render collaborator while mounting the off-screen
/// measurement surface or waiting for it to settle.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("mount failed: {0}")]
    Mount(String),

    #[error("font loading failed: {0}")]
    FontLoad(String),

    #[error("render tree detached before measurement: {0}")]
    Detached(String),

    #[error("render surface error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Engine-level error type.
///
/// Only conditions that abort a whole pagination pass live here. Recoverable
/// conditions are deliberately NOT variants: a section missing from the
/// mounted tree is a measurement fault (counted and logged, assignment
/// proceeds without it), an item taller than a full page is an accepted
/// overflow (warned, force-placed), and a superseded pass is discarded
/// silently. A failed pass leaves the previously published pages intact.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
