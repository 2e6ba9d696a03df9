//! Formula preprocessing: turning a formula into a pure arithmetic expression.
//!
//! Two passes run over the text after the leading `=` is stripped:
//!
//! - **Range functions**: `SUM(A1:B5)` and `AVERAGE(A1:B5)` are reduced over
//!   the grid and replaced by the resulting numeral.
//! - **References**: every remaining `A1`-style token is replaced by the
//!   referenced cell's current value, or `0` when the cell is absent or not
//!   numeric.
//!
//! Every inserted numeral is parenthesized, so it stays one operand and can
//! never merge with neighbouring digits or a decimal point (`1.A1`).
//!
//! Substitution is one-shot: a referenced cell's formula is never
//! re-evaluated, only its stored value is read.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::cell::Grid;
use super::cell_ref::CellRef;
use super::format::{format_number, parse_number};
use super::range::CellRange;
use crate::error::{EvalError, Result};

/// Range reductions understood inside formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeFunction {
    Sum,
    Average,
}

impl RangeFunction {
    pub fn from_name(name: &str) -> Option<RangeFunction> {
        match name {
            "SUM" => Some(RangeFunction::Sum),
            "AVERAGE" => Some(RangeFunction::Average),
            _ => None,
        }
    }

    /// Fold the numeric values of a range.
    ///
    /// SUM treats non-numeric and absent cells as zero. AVERAGE excludes them
    /// from both the total and the count; with no numeric cells it yields 0.
    pub fn reduce(self, values: &[f64]) -> f64 {
        let total: f64 = values.iter().sum();
        match self {
            RangeFunction::Sum => total,
            RangeFunction::Average if values.is_empty() => 0.0,
            RangeFunction::Average => total / values.len() as f64,
        }
    }
}

pub fn range_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(SUM|AVERAGE)\(\s*([A-Z]+[0-9]+)\s*:\s*([A-Z]+[0-9]+)\s*\)")
            .expect("range function regex must compile")
    })
}

pub fn cell_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b([A-Z]+)([0-9]+)\b").expect("cell reference regex must compile")
    })
}

fn parenthesize(n: f64) -> String {
    format!("({})", format_number(n))
}

/// Replace every `SUM(a:b)` / `AVERAGE(a:b)` call with its value.
pub fn expand_range_functions(expr: &str, grid: &Grid) -> Result<String> {
    let mut failure: Option<EvalError> = None;
    let expanded = range_fn_re().replace_all(expr, |caps: &Captures| {
        let start = CellRef::from_label(&caps[2]);
        let end = CellRef::from_label(&caps[3]);
        let (Some(func), Some(start), Some(end)) = (RangeFunction::from_name(&caps[1]), start, end)
        else {
            failure.get_or_insert_with(|| EvalError::InvalidRange(caps[0].to_string()));
            return String::new();
        };
        let values = CellRange::new(start, end).numeric_values(grid);
        parenthesize(func.reduce(&values))
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(expanded.into_owned()),
    }
}

/// Replace every plain cell reference with the referenced cell's value.
///
/// Tokens that look like references but are not canonical (e.g. `A0`) are
/// left untouched so the arithmetic parser rejects them.
pub fn substitute_references(expr: &str, grid: &Grid) -> String {
    cell_ref_re()
        .replace_all(expr, |caps: &Captures| {
            let Some(cell_ref) = CellRef::from_label(&caps[0]) else {
                return caps[0].to_string();
            };
            grid.get(&cell_ref)
                .and_then(|cell| parse_number(&cell.value))
                .map_or_else(|| "(0)".to_string(), parenthesize)
        })
        .into_owned()
}

/// Run both passes: ranges first, then plain references.
pub fn preprocess_formula(expr: &str, grid: &Grid) -> Result<String> {
    let expanded = expand_range_functions(expr, grid)?;
    Ok(substitute_references(&expanded, grid))
}
