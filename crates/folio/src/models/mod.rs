pub mod document;
pub mod section;

pub use document::{Document, FontSizeTable, Header, LayoutParameters};
pub use section::{
    Certification, EducationEntry, InfoBlock, Project, Section, SectionContent, SectionKind,
    SkillGroup, WorkExperience,
};
