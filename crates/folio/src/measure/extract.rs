//! Measurement extraction — reads per-entity box heights off a mounted tree.
//!
//! A pure read of rendered state: nothing here mutates the tree or the
//! document. Measurements live for exactly one pagination pass and are
//! never persisted. A section whose node cannot be located is a measurement
//! fault — excluded from assignment, counted, and logged, never fatal.

use tracing::{debug, warn};

use crate::models::Document;
use crate::render::{MountedTree, NodeBox};

// ────────────────────────────────────────────────────────────────────────────
// Measurement records
// ────────────────────────────────────────────────────────────────────────────

/// Measurements for one item (one direct child of a section's content
/// wrapper).
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMeasurement {
    pub index: usize,
    /// Border-box height.
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ItemMeasurement {
    /// Vertical budget the item consumes on a page, margins included.
    pub fn outer_height(&self) -> f32 {
        self.height + self.margin_top + self.margin_bottom
    }
}

/// Measurements for one enabled section.
#[derive(Debug, Clone)]
pub struct SectionMeasurement {
    pub section_id: String,
    /// Box height of the whole section including its own margins.
    pub total_height: f32,
    /// Title block height, exclusive of its margins. 0.0 when the template
    /// renders the section without a title element.
    pub header_height: f32,
    pub header_margin_top: f32,
    pub header_margin_bottom: f32,
    pub content_wrapper_height: f32,
    pub items: Vec<ItemMeasurement>,
}

impl SectionMeasurement {
    /// Budget cost of the title block on a page — what a continuation page
    /// saves by suppressing the title.
    pub fn title_cost(&self) -> f32 {
        self.header_height + self.header_margin_top + self.header_margin_bottom
    }
}

/// All measurements for one pagination pass.
#[derive(Debug, Clone, Default)]
pub struct DocumentMeasurements {
    /// Outer height of the personal-info header block; 0.0 when absent.
    /// Charged against page 1's budget only.
    pub header_height: f32,
    /// One record per measurable enabled section, in section order.
    pub sections: Vec<SectionMeasurement>,
    /// Count of sections whose nodes could not be located in the tree.
    pub faults: u32,
}

impl DocumentMeasurements {
    pub fn section(&self, id: &str) -> Option<&SectionMeasurement> {
        self.sections.iter().find(|m| m.section_id == id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Walks the mounted tree and captures measurements for the header block
/// and every enabled section, in section order.
///
/// Edge cases follow the render contract: a missing title element measures
/// as zero title cost; a missing content wrapper means the section rendered
/// empty and is skipped outright (it contributes no height and is never
/// split); a missing section node is a measurement fault.
pub fn measure_document(tree: &dyn MountedTree, document: &Document) -> DocumentMeasurements {
    let header_height = tree
        .header_box()
        .map(|b| b.outer_height())
        .unwrap_or(0.0);

    let mut out = DocumentMeasurements {
        header_height,
        sections: Vec::new(),
        faults: 0,
    };

    for section in document.enabled_sections() {
        let Some(section_box) = tree.section_box(&section.id) else {
            warn!(
                section_id = %section.id,
                "section node not found in mounted tree; excluding from assignment"
            );
            out.faults += 1;
            continue;
        };

        let Some(content_box) = tree.content_box(&section.id) else {
            debug!(
                section_id = %section.id,
                "section rendered without content wrapper; skipping empty section"
            );
            continue;
        };

        let title = tree.title_box(&section.id);
        let items = tree
            .item_boxes(&section.id)
            .into_iter()
            .enumerate()
            .map(|(index, b)| item_measurement(index, b))
            .collect();

        out.sections.push(SectionMeasurement {
            section_id: section.id.clone(),
            total_height: section_box.outer_height(),
            header_height: title.map(|t| t.height).unwrap_or(0.0),
            header_margin_top: title.map(|t| t.margin_top).unwrap_or(0.0),
            header_margin_bottom: title.map(|t| t.margin_bottom).unwrap_or(0.0),
            content_wrapper_height: content_box.height,
            items,
        });
    }

    out
}

fn item_measurement(index: usize, b: NodeBox) -> ItemMeasurement {
    ItemMeasurement {
        index,
        height: b.height,
        margin_top: b.margin_top,
        margin_bottom: b.margin_bottom,
        top: b.top,
        bottom: b.bottom,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, LayoutParameters, Section, SectionContent, WorkExperience};
    use crate::render::{HeadlessSurface, HeightProfile, RenderSurface, SectionProfile};
    use chrono::Utc;
    use uuid::Uuid;

    fn make_section(id: &str, order: i32, items: usize) -> Section {
        Section {
            id: id.to_string(),
            title: id.to_string(),
            enabled: true,
            order,
            hide_title: false,
            content: SectionContent::Experience(
                (0..items)
                    .map(|i| WorkExperience {
                        company: format!("Co {i}"),
                        role: "Engineer".to_string(),
                        start: None,
                        end: None,
                        location: None,
                        bullets: vec![],
                    })
                    .collect(),
            ),
        }
    }

    fn make_document(sections: Vec<Section>) -> Document {
        Document {
            id: Uuid::new_v4(),
            header: None,
            sections,
            layout: LayoutParameters::default_a4(),
            updated_at: Utc::now(),
        }
    }

    async fn mount(doc: &Document, profile: HeightProfile) -> Box<dyn crate::render::MountedTree> {
        HeadlessSurface::new(profile).mount(doc).await.unwrap()
    }

    #[tokio::test]
    async fn test_measures_title_items_and_total() {
        let doc = make_document(vec![make_section("experience", 1, 2)]);
        let profile = HeightProfile::default().section(
            "experience",
            SectionProfile {
                title_height: 40.0,
                title_margin_bottom: 8.0,
                item_heights: vec![120.0, 90.0],
                item_margin_bottom: 10.0,
                margin_bottom: 16.0,
                no_content: false,
            },
        );

        let tree = mount(&doc, profile).await;
        let measured = measure_document(tree.as_ref(), &doc);

        assert_eq!(measured.faults, 0);
        assert_eq!(measured.sections.len(), 1);

        let m = &measured.sections[0];
        assert_eq!(m.header_height, 40.0);
        assert_eq!(m.header_margin_bottom, 8.0);
        assert_eq!(m.title_cost(), 48.0);
        assert_eq!(m.items.len(), 2);
        assert_eq!(m.items[0].outer_height(), 130.0);
        assert_eq!(m.items[1].index, 1);
        // title 40 + gap 8 + (120+10) + (90+10), plus 16 section margin
        assert_eq!(m.total_height, 294.0);
    }

    #[tokio::test]
    async fn test_missing_section_node_counts_as_fault() {
        let doc = make_document(vec![make_section("a", 1, 1), make_section("ghost", 2, 1)]);
        let profile =
            HeightProfile::default().section("a", SectionProfile::new(40.0, vec![100.0]));

        let tree = mount(&doc, profile).await;
        let measured = measure_document(tree.as_ref(), &doc);

        assert_eq!(measured.faults, 1, "ghost section has no node");
        assert_eq!(measured.sections.len(), 1);
        assert!(measured.section("ghost").is_none());
        assert!(measured.section("a").is_some());
    }

    #[tokio::test]
    async fn test_empty_section_skipped_without_fault() {
        let doc = make_document(vec![make_section("a", 1, 0)]);
        let profile = HeightProfile::default().section(
            "a",
            SectionProfile {
                title_height: 40.0,
                no_content: true,
                ..SectionProfile::default()
            },
        );

        let tree = mount(&doc, profile).await;
        let measured = measure_document(tree.as_ref(), &doc);

        assert_eq!(measured.faults, 0, "empty section is not a fault");
        assert!(
            measured.sections.is_empty(),
            "wrapper-less section contributes no measurement"
        );
    }

    #[tokio::test]
    async fn test_untitled_section_measures_zero_title_cost() {
        let doc = make_document(vec![make_section("a", 1, 1)]);
        let profile =
            HeightProfile::default().section("a", SectionProfile::new(0.0, vec![100.0]));

        let tree = mount(&doc, profile).await;
        let measured = measure_document(tree.as_ref(), &doc);

        let m = measured.section("a").expect("section measured");
        assert_eq!(m.header_height, 0.0);
        assert_eq!(m.title_cost(), 0.0);
    }

    #[tokio::test]
    async fn test_header_height_taken_from_header_box() {
        let mut doc = make_document(vec![make_section("a", 1, 1)]);
        doc.header = Some(crate::models::Header {
            full_name: "Ada Lovelace".to_string(),
            headline: None,
            email: None,
            phone: None,
            location: None,
            links: vec![],
        });

        let profile = HeightProfile::default()
            .with_header(72.0)
            .section("a", SectionProfile::new(40.0, vec![100.0]));

        let tree = mount(&doc, profile).await;
        let measured = measure_document(tree.as_ref(), &doc);
        assert_eq!(measured.header_height, 72.0);
    }
}
