//! Tabular read-out of the document for external consumers.

pub mod records;

pub use records::{RowRecord, SYNTHETIC_HEADER_PREFIX, export_records, header_labels};
