// Pagination core: the pure page-assignment algorithm over measurements,
// the partial-section materializer, and the debounced orchestrator.

pub mod assign;
pub mod engine;
pub mod partial;

pub use assign::assign_pages;
pub use engine::{PaginationState, Paginator};
pub use partial::partial_section;
