//! Spreadsheet engine API.
//!
//! - [`Cell`], [`CellStyle`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`] - Address parsing (A1 notation <-> row/col indices)
//! - [`CellRange`] - Rectangular ranges used by `SUM`/`AVERAGE`
//! - [`preprocess_formula`] - Range folding and reference substitution
//! - [`eval_arithmetic`] - Numeric expression parser
//! - [`evaluate`] - Formula text to display value
//! - [`format_number`] - Format values for display

mod arith;
mod cell;
mod cell_ref;
mod eval;
mod format;
mod preprocess;
mod range;

pub use arith::eval_arithmetic;
pub use cell::{Align, Cell, CellStyle, Grid, StyleChange, display_value};
pub use cell_ref::{CellRef, decode, encode};
pub use eval::{ERROR_SENTINEL, evaluate, evaluate_formula};
pub use format::{format_number, parse_number};
pub use preprocess::{
    RangeFunction, expand_range_functions, preprocess_formula, substitute_references,
};
pub use range::CellRange;
