//! Folio — the pagination engine behind a browser-based resume editor.
//!
//! Given a resolved document (ordered, enabled sections with typed content)
//! and a render collaborator that can mount it off-screen and report box
//! metrics back, Folio splits the document into fixed-height page documents
//! that mimic print layout. Heights are never computed from text — they are
//! read off the mounted tree after fonts settle, then fed to a greedy page
//! assignment with item-level splitting and orphan avoidance.
//!
//! The [`Paginator`] orchestrator debounces document edits, keeps at most
//! one pass in flight, and publishes the latest page split plus a busy flag
//! through a watch channel.

pub mod config;
pub mod errors;
pub mod geometry;
pub mod measure;
pub mod models;
pub mod paginate;
pub mod render;

pub use config::EngineConfig;
pub use errors::{EngineError, RenderError};
pub use measure::{measure_document, DocumentMeasurements};
pub use models::{Document, Header, LayoutParameters, Section, SectionContent};
pub use paginate::{assign_pages, PaginationState, Paginator};
pub use render::{HeadlessSurface, HeightProfile, MountedTree, NodeBox, RenderSurface};
