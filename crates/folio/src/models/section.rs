//! Section model — a titled, ordered block of the resume plus typed content.
//!
//! `SectionContent` is a discriminated union: the variant is the section
//! type, and list-bearing variants hold the items the assignment algorithm
//! may split across page boundaries. Scalar variants (`Summary`, `Custom`)
//! are never split mid-content. Item types are opaque to the engine beyond
//! "renders to some height and can be extracted by index".

use std::ops::Range;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Item types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub label: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoBlock {
    pub label: String,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Section content
// ────────────────────────────────────────────────────────────────────────────

/// Section kind, one per `SectionContent` variant. Used for logging and for
/// template selection by the render collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    AdditionalInfo,
    Custom,
}

/// Typed section content. Serialized adjacently tagged, so editor JSON
/// carries `{"type": "experience", "content": [...]}` inline in the section
/// object (the tag doubles as the section's type field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "kebab-case")]
pub enum SectionContent {
    Summary(String),
    Experience(Vec<WorkExperience>),
    Education(Vec<EducationEntry>),
    Skills(Vec<SkillGroup>),
    Certifications(Vec<Certification>),
    Projects(Vec<Project>),
    AdditionalInfo(Vec<InfoBlock>),
    Custom(String),
}

impl SectionContent {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionContent::Summary(_) => SectionKind::Summary,
            SectionContent::Experience(_) => SectionKind::Experience,
            SectionContent::Education(_) => SectionKind::Education,
            SectionContent::Skills(_) => SectionKind::Skills,
            SectionContent::Certifications(_) => SectionKind::Certifications,
            SectionContent::Projects(_) => SectionKind::Projects,
            SectionContent::AdditionalInfo(_) => SectionKind::AdditionalInfo,
            SectionContent::Custom(_) => SectionKind::Custom,
        }
    }

    /// Number of splittable items, or `None` for scalar content.
    pub fn item_count(&self) -> Option<usize> {
        match self {
            SectionContent::Summary(_) | SectionContent::Custom(_) => None,
            SectionContent::Experience(v) => Some(v.len()),
            SectionContent::Education(v) => Some(v.len()),
            SectionContent::Skills(v) => Some(v.len()),
            SectionContent::Certifications(v) => Some(v.len()),
            SectionContent::Projects(v) => Some(v.len()),
            SectionContent::AdditionalInfo(v) => Some(v.len()),
        }
    }

    /// True when the content is a list the assignment algorithm may split.
    pub fn is_splittable(&self) -> bool {
        self.item_count().is_some()
    }

    /// Clone of this content restricted to `range`, preserving the variant.
    /// Scalar content is returned whole — scalar sections never split.
    ///
    /// Callers must keep `range` within `item_count()`; the assignment
    /// algorithm only produces in-bounds ranges.
    pub fn slice(&self, range: Range<usize>) -> SectionContent {
        match self {
            SectionContent::Summary(s) => SectionContent::Summary(s.clone()),
            SectionContent::Custom(s) => SectionContent::Custom(s.clone()),
            SectionContent::Experience(v) => SectionContent::Experience(v[range].to_vec()),
            SectionContent::Education(v) => SectionContent::Education(v[range].to_vec()),
            SectionContent::Skills(v) => SectionContent::Skills(v[range].to_vec()),
            SectionContent::Certifications(v) => {
                SectionContent::Certifications(v[range].to_vec())
            }
            SectionContent::Projects(v) => SectionContent::Projects(v[range].to_vec()),
            SectionContent::AdditionalInfo(v) => {
                SectionContent::AdditionalInfo(v[range].to_vec())
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section
// ────────────────────────────────────────────────────────────────────────────

/// A titled, ordered block of the document with enable/disable and relative
/// order. Only enabled sections participate in pagination; `order` defines
/// the render sequence regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable per-section identifier; also the attribute the render
    /// collaborator exposes on the section's element. Uniqueness is a
    /// caller contract.
    pub id: String,
    pub title: String,
    pub enabled: bool,
    pub order: i32,
    /// Suppresses the title when rendering. Set by the engine on every
    /// continuation placement; may also be set by the user on the source.
    #[serde(default)]
    pub hide_title: bool,
    #[serde(flatten)]
    pub content: SectionContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
