//! tabula-core - UI-agnostic document model, undo history and record export.

pub mod document;
pub mod error;
pub mod history;
pub mod storage;

pub use document::Document;
pub use error::{CoreError, Result};
pub use history::History;
pub use storage::{RowRecord, export_records};

pub use tabula_engine::engine::{Cell, CellRef, CellStyle, StyleChange};
