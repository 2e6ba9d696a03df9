//! Tabula - spreadsheet cell grid with formulas, undo history and record export.
//!
//! The document model lives in `tabula-core`, formula evaluation in
//! `tabula-engine`. This crate adds configuration, logging and the edit
//! script driver used by the `tabula` binary.

pub mod config;
pub mod error;
pub mod logging;
pub mod script;

pub use config::Config;
pub use error::{Result, TabulaError};

use tabula_engine::engine::{ERROR_SENTINEL, Grid, evaluate};

/// Evaluate a single formula against an empty grid. A missing leading `=`
/// is added. Returns the display value and whether it is an error.
pub fn evaluate_command(formula: &str) -> (String, bool) {
    let formula = formula.trim();
    let formula = if formula.starts_with('=') {
        formula.to_string()
    } else {
        format!("={}", formula)
    };
    let value = evaluate(&formula, &Grid::new());
    let failed = value == ERROR_SENTINEL;
    (value, failed)
}
