//! tabula_engine - Spreadsheet addressing, cell model and formula evaluation.

pub mod engine;
pub mod error;

pub use error::{AddressError, EvalError};
