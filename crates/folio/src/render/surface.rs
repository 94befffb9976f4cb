//! Render surface contract — the structural interface the engine requires
//! from whatever renders the document: a browser DOM, a headless layout
//! engine, or an HTML-to-metrics service. Swapping the backend never
//! touches the assignment algorithm.

use async_trait::async_trait;

use crate::errors::RenderError;
use crate::models::Document;

/// Box metrics for one rendered element, in the engine's pixel basis.
/// `height` is the border-box height; margins are reported separately so
/// continuation budgeting can re-derive costs without the title block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeBox {
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Offset of the box top relative to the mounted tree's root.
    pub top: f32,
    pub bottom: f32,
}

impl NodeBox {
    /// Height including margin space — the cost the box adds to a page's
    /// vertical budget.
    pub fn outer_height(&self) -> f32 {
        self.height + self.margin_top + self.margin_bottom
    }
}

/// A document mounted into a detached, off-screen surface at exact page
/// width, positioned outside the visible viewport with print chrome
/// (shadow, scaling) disabled.
///
/// Implementations own whatever off-screen resources back the tree and MUST
/// release them on `Drop`. Teardown is a guaranteed-release contract that
/// holds on success and failure paths alike, never best-effort: the
/// orchestrator drops the tree after measurement and on every early exit.
#[async_trait]
pub trait MountedTree: Send {
    /// Resolves once every font the tree uses has finished loading.
    /// Measuring before this (plus a short settle delay) reads heights
    /// that are systematically wrong.
    async fn fonts_ready(&self) -> Result<(), RenderError>;

    /// Metrics of the personal-info header block, if the document has one.
    fn header_box(&self) -> Option<NodeBox>;

    /// Metrics of the element carrying the given section id. `None` is a
    /// measurement fault, not a crash — the caller excludes the section
    /// from assignment.
    fn section_box(&self, section_id: &str) -> Option<NodeBox>;

    /// Metrics of the section's title element. `None` when the template
    /// renders the section without a title block.
    fn title_box(&self, section_id: &str) -> Option<NodeBox>;

    /// Metrics of the section's immediate content-wrapper element. `None`
    /// means the section rendered empty.
    fn content_box(&self, section_id: &str) -> Option<NodeBox>;

    /// Metrics of the content wrapper's direct children, 1:1 with the
    /// section's items in order.
    fn item_boxes(&self, section_id: &str) -> Vec<NodeBox>;
}

/// The render collaborator. Carried by the orchestrator as
/// `Arc<dyn RenderSurface>` so backends swap without touching engine code.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Renders the full document (all enabled sections, all items) into a
    /// detached surface sized to the target page width, using the same
    /// template the user sees.
    async fn mount(&self, document: &Document) -> Result<Box<dyn MountedTree>, RenderError>;
}
