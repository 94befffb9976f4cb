pub mod extract;

pub use extract::{measure_document, DocumentMeasurements, ItemMeasurement, SectionMeasurement};
