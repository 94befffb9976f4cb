//! Headless render surface — a non-browser implementation of the render
//! collaborator driven by a declarative height profile.
//!
//! Stands in for the browser DOM wherever real font rendering is
//! unavailable: the engine's own tests, server-side previews, and local
//! diagnosis of page splits. Sections are stacked top-to-bottom the way the
//! print template stacks them; a section absent from the profile is simply
//! not mounted, which is how callers exercise the measurement-fault path.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::RenderError;
use crate::models::Document;
use crate::render::surface::{MountedTree, NodeBox, RenderSurface};

// ────────────────────────────────────────────────────────────────────────────
// Height profiles
// ────────────────────────────────────────────────────────────────────────────

/// Fixed heights used to mount one section headlessly.
#[derive(Debug, Clone, Default)]
pub struct SectionProfile {
    pub title_height: f32,
    pub title_margin_bottom: f32,
    /// One entry per item, in item order.
    pub item_heights: Vec<f32>,
    /// Bottom margin applied to every item.
    pub item_margin_bottom: f32,
    /// Bottom margin of the section element itself.
    pub margin_bottom: f32,
    /// Mounts the section without a content wrapper (an empty section).
    pub no_content: bool,
}

impl SectionProfile {
    pub fn new(title_height: f32, item_heights: Vec<f32>) -> Self {
        SectionProfile {
            title_height,
            item_heights,
            ..SectionProfile::default()
        }
    }
}

/// Height profile for a whole document: header height plus per-section
/// profiles keyed by section id.
#[derive(Debug, Clone, Default)]
pub struct HeightProfile {
    /// Outer height of the personal-info header block.
    pub header_height: f32,
    pub sections: HashMap<String, SectionProfile>,
}

impl HeightProfile {
    pub fn with_header(mut self, height: f32) -> Self {
        self.header_height = height;
        self
    }

    pub fn section(mut self, id: &str, profile: SectionProfile) -> Self {
        self.sections.insert(id.to_string(), profile);
        self
    }

    /// Profile giving every enabled section the same title height and every
    /// item the same height. Scalar sections mount with one content child.
    pub fn uniform(document: &Document, title_height: f32, item_height: f32) -> Self {
        let mut profile = HeightProfile {
            header_height: if document.header.is_some() { 60.0 } else { 0.0 },
            sections: HashMap::new(),
        };
        for section in document.enabled_sections() {
            let n = section.content.item_count().unwrap_or(1);
            profile.sections.insert(
                section.id.clone(),
                SectionProfile::new(title_height, vec![item_height; n]),
            );
        }
        profile
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Surface
// ────────────────────────────────────────────────────────────────────────────

/// Headless implementation of [`RenderSurface`].
pub struct HeadlessSurface {
    profile: HeightProfile,
    /// Simulated font-load time, so orchestration tests see a real await
    /// point. Zero by default.
    font_delay: Duration,
}

impl HeadlessSurface {
    pub fn new(profile: HeightProfile) -> Self {
        HeadlessSurface {
            profile,
            font_delay: Duration::ZERO,
        }
    }

    pub fn with_font_delay(mut self, delay: Duration) -> Self {
        self.font_delay = delay;
        self
    }
}

#[async_trait]
impl RenderSurface for HeadlessSurface {
    async fn mount(&self, document: &Document) -> Result<Box<dyn MountedTree>, RenderError> {
        let mut cursor = 0.0f32;

        let header = if document.header.is_some() && self.profile.header_height > 0.0 {
            let b = stacked_box(&mut cursor, self.profile.header_height, 0.0, 0.0);
            Some(b)
        } else {
            None
        };

        let mut sections = HashMap::new();
        for section in document.enabled_sections() {
            // Unprofiled sections are left unmounted: the extractor treats
            // them as measurement faults.
            let Some(p) = self.profile.sections.get(&section.id) else {
                continue;
            };
            sections.insert(section.id.clone(), mount_section(&mut cursor, p));
        }

        Ok(Box::new(HeadlessTree {
            font_delay: self.font_delay,
            header,
            sections,
        }))
    }
}

/// Advances the cursor past one stacked box and returns its metrics.
fn stacked_box(cursor: &mut f32, height: f32, margin_top: f32, margin_bottom: f32) -> NodeBox {
    let top = *cursor + margin_top;
    let b = NodeBox {
        height,
        margin_top,
        margin_bottom,
        top,
        bottom: top + height,
    };
    *cursor = b.bottom + margin_bottom;
    b
}

fn mount_section(cursor: &mut f32, p: &SectionProfile) -> MountedSection {
    let section_top = *cursor;

    let title = if p.title_height > 0.0 {
        Some(stacked_box(cursor, p.title_height, 0.0, p.title_margin_bottom))
    } else {
        None
    };

    if p.no_content {
        let height = *cursor - section_top;
        *cursor += p.margin_bottom;
        return MountedSection {
            section: NodeBox {
                height,
                margin_top: 0.0,
                margin_bottom: p.margin_bottom,
                top: section_top,
                bottom: section_top + height,
            },
            title,
            content: None,
            items: Vec::new(),
        };
    }

    let content_top = *cursor;
    let items: Vec<NodeBox> = p
        .item_heights
        .iter()
        .map(|&h| stacked_box(cursor, h, 0.0, p.item_margin_bottom))
        .collect();
    let content = NodeBox {
        height: *cursor - content_top,
        margin_top: 0.0,
        margin_bottom: 0.0,
        top: content_top,
        bottom: *cursor,
    };

    let height = *cursor - section_top;
    *cursor += p.margin_bottom;

    MountedSection {
        section: NodeBox {
            height,
            margin_top: 0.0,
            margin_bottom: p.margin_bottom,
            top: section_top,
            bottom: section_top + height,
        },
        title,
        content: Some(content),
        items,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mounted tree
// ────────────────────────────────────────────────────────────────────────────

struct MountedSection {
    section: NodeBox,
    title: Option<NodeBox>,
    content: Option<NodeBox>,
    items: Vec<NodeBox>,
}

/// Plain-data mounted tree. Owns nothing external, so the guaranteed
/// teardown contract is satisfied by an ordinary drop.
struct HeadlessTree {
    font_delay: Duration,
    header: Option<NodeBox>,
    sections: HashMap<String, MountedSection>,
}

#[async_trait]
impl MountedTree for HeadlessTree {
    async fn fonts_ready(&self) -> Result<(), RenderError> {
        if !self.font_delay.is_zero() {
            tokio::time::sleep(self.font_delay).await;
        }
        Ok(())
    }

    fn header_box(&self) -> Option<NodeBox> {
        self.header
    }

    fn section_box(&self, section_id: &str) -> Option<NodeBox> {
        self.sections.get(section_id).map(|s| s.section)
    }

    fn title_box(&self, section_id: &str) -> Option<NodeBox> {
        self.sections.get(section_id).and_then(|s| s.title)
    }

    fn content_box(&self, section_id: &str) -> Option<NodeBox> {
        self.sections.get(section_id).and_then(|s| s.content)
    }

    fn item_boxes(&self, section_id: &str) -> Vec<NodeBox> {
        self.sections
            .get(section_id)
            .map(|s| s.items.clone())
            .unwrap_or_default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
