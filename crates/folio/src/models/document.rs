//! Document model — the resolved resume snapshot the editor hands the engine.
//!
//! The engine never mutates a document. Each pagination pass reads one
//! immutable snapshot and produces page documents: full clones carrying a
//! restricted section list, with the header retained on page 1 only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::PageSize;
use crate::models::section::Section;

/// Personal-info header block. Rendered first on page 1 only, never
/// repeated on later pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub full_name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Font sizes (pt) per element role. Consumed by the render collaborator;
/// carried on the document so every page clone is renderable standalone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSizeTable {
    pub name_pt: f32,
    pub section_title_pt: f32,
    pub body_pt: f32,
}

impl Default for FontSizeTable {
    fn default() -> Self {
        FontSizeTable {
            name_pt: 24.0,
            section_title_pt: 14.0,
            body_pt: 10.5,
        }
    }
}

/// Global layout parameters: paper size, margins in inches on four sides,
/// line-height multiplier, fonts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutParameters {
    pub page_size: PageSize,
    pub margin_top_in: f32,
    pub margin_right_in: f32,
    pub margin_bottom_in: f32,
    pub margin_left_in: f32,
    /// Line-height multiplier applied by the templates.
    pub line_height: f32,
    #[serde(default)]
    pub font_sizes: FontSizeTable,
    pub font_family: String,
}

impl LayoutParameters {
    /// A4, 0.75" margins all around, 1.15 line height — the editor's
    /// default template geometry.
    pub fn default_a4() -> Self {
        LayoutParameters {
            page_size: PageSize::A4,
            margin_top_in: 0.75,
            margin_right_in: 0.75,
            margin_bottom_in: 0.75,
            margin_left_in: 0.75,
            line_height: 1.15,
            font_sizes: FontSizeTable::default(),
            font_family: "Inter".to_string(),
        }
    }
}

/// A resolved resume document: sections plus layout parameters plus an
/// optional header. `id` and `updated_at` come from the editor and identify
/// the snapshot; the engine reads them but never changes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    #[serde(default)]
    pub header: Option<Header>,
    pub sections: Vec<Section>,
    pub layout: LayoutParameters,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Parses a document snapshot from the editor's JSON wire shape.
    pub fn from_json(raw: &str) -> serde_json::Result<Document> {
        serde_json::from_str(raw)
    }

    /// Sections that participate in pagination: enabled, sorted by `order`.
    /// Insertion order of `sections` is irrelevant.
    pub fn enabled_sections(&self) -> Vec<&Section> {
        let mut out: Vec<&Section> = self.sections.iter().filter(|s| s.enabled).collect();
        out.sort_by_key(|s| s.order);
        out
    }

    /// Clone of this document carrying only the given sections — one output
    /// page. `keep_header` is true for page 1 only.
    pub fn page_with(&self, sections: Vec<Section>, keep_header: bool) -> Document {
        Document {
            id: self.id,
            header: if keep_header { self.header.clone() } else { None },
            sections,
            layout: self.layout.clone(),
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::SectionContent;

    fn make_section(id: &str, order: i32, enabled: bool) -> Section {
        Section {
            id: id.to_string(),
            title: id.to_string(),
            enabled,
            order,
            hide_title: false,
            content: SectionContent::Summary("text".to_string()),
        }
    }

    fn make_document(sections: Vec<Section>) -> Document {
        Document {
            id: Uuid::new_v4(),
            header: Some(Header {
                full_name: "Ada Lovelace".to_string(),
                headline: Some("Engineer".to_string()),
                email: None,
                phone: None,
                location: None,
                links: vec![],
            }),
            sections,
            layout: LayoutParameters::default_a4(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_enabled_sections_filters_and_sorts() {
        let doc = make_document(vec![
            make_section("skills", 3, true),
            make_section("experience", 1, true),
            make_section("projects", 2, false),
            make_section("education", 2, true),
        ]);

        let enabled = doc.enabled_sections();
        let ids: Vec<&str> = enabled.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["experience", "education", "skills"],
            "disabled sections drop out and order decides sequence"
        );
    }

    #[test]
    fn test_page_with_keeps_header_only_when_asked() {
        let doc = make_document(vec![make_section("summary", 1, true)]);

        let first = doc.page_with(doc.sections.clone(), true);
        assert!(first.header.is_some(), "page 1 carries the header");

        let later = doc.page_with(doc.sections.clone(), false);
        assert!(later.header.is_none(), "continuation pages never carry it");
        assert_eq!(later.id, doc.id);
        assert_eq!(later.layout, doc.layout);
    }

    #[test]
    fn test_from_json_round_trip() {
        let doc = make_document(vec![make_section("summary", 1, true)]);
        let raw = serde_json::to_string(&doc).unwrap();
        let back = Document::from_json(&raw).unwrap();
        assert_eq!(back, doc);
    }
}
