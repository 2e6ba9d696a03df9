//! Formula evaluation.
//!
//! `=`-prefixed text is reduced in three steps: range functions are folded
//! over the grid, remaining references are replaced by stored values, and the
//! resulting arithmetic expression is parsed and computed. Every failure
//! collapses to [`ERROR_SENTINEL`] at the public boundary.

use super::arith::eval_arithmetic;
use super::cell::Grid;
use super::format::format_number;
use super::preprocess::preprocess_formula;
use crate::error::{EvalError, Result};

/// Stored as a cell's value when its formula cannot be evaluated.
pub const ERROR_SENTINEL: &str = "#ERROR";

/// Evaluate a formula and keep the structured failure reason.
pub fn evaluate_formula(formula: &str, grid: &Grid) -> Result<f64> {
    let body = formula.strip_prefix('=').ok_or(EvalError::MissingEquals)?;
    let expr = preprocess_formula(body, grid)?;
    eval_arithmetic(&expr)
}

/// Evaluate a formula to its display string. Never fails: errors yield `#ERROR`.
pub fn evaluate(formula: &str, grid: &Grid) -> String {
    match evaluate_formula(formula, grid) {
        Ok(n) => format_number(n),
        Err(err) => {
            tracing::trace!(formula, error = %err, "formula evaluation failed");
            ERROR_SENTINEL.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Cell, CellRef};

    fn grid_with(cells: &[(&str, &str)]) -> Grid {
        cells
            .iter()
            .map(|(label, value)| (CellRef::from_label(label).unwrap(), Cell::new_literal(value)))
            .collect()
    }

    #[test]
    fn test_reference_arithmetic() {
        let grid = grid_with(&[("A1", "3"), ("A2", "4")]);
        assert_eq!(evaluate("=A1+A2", &grid), "7");
        assert_eq!(evaluate("=(A1+A2)*2/4", &grid), "3.5");
    }

    #[test]
    fn test_range_with_text_cell() {
        let grid = grid_with(&[("A1", "1"), ("A2", "2"), ("A3", "abc")]);
        assert_eq!(evaluate("=SUM(A1:A3)", &grid), "3");
        assert_eq!(evaluate("=AVERAGE(A1:A3)", &grid), "1.5");
        assert_eq!(evaluate("=SUM(A1:A3)*AVERAGE(A1:A2)", &grid), "4.5");
    }

    #[test]
    fn test_negative_range_result_in_expression() {
        let grid = grid_with(&[("A1", "-2"), ("A2", "-1")]);
        assert_eq!(evaluate("=10-SUM(A1:A2)", &grid), "13");
        assert_eq!(evaluate("=2*SUM(A1:A2)", &grid), "-6");
    }

    #[test]
    fn test_average_of_no_numeric_cells_is_zero() {
        let grid = grid_with(&[("A1", "x")]);
        assert_eq!(evaluate("=AVERAGE(A1:A1)", &grid), "0");
        assert_eq!(evaluate("=AVERAGE(B1:B9)", &grid), "0");
    }

    #[test]
    fn test_error_sentinel() {
        let grid = Grid::new();
        assert_eq!(evaluate("=1/0", &grid), ERROR_SENTINEL);
        assert_eq!(evaluate("=(1+2", &grid), ERROR_SENTINEL);
        assert_eq!(evaluate("=MAX(A1:A2)", &grid), ERROR_SENTINEL);
        assert_eq!(evaluate("=SUM(A0:A2)", &grid), ERROR_SENTINEL);
        assert_eq!(evaluate("=", &grid), ERROR_SENTINEL);
        assert_eq!(evaluate("1+1", &grid), ERROR_SENTINEL);
    }

    #[test]
    fn test_structured_error_kinds() {
        let grid = Grid::new();
        assert_eq!(evaluate_formula("1+1", &grid), Err(EvalError::MissingEquals));
        assert_eq!(evaluate_formula("=1/0", &grid), Err(EvalError::NonFinite));
        assert!(matches!(
            evaluate_formula("=SUM(A0:A1)", &grid),
            Err(EvalError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_reads_stored_value_not_formula() {
        let mut grid = grid_with(&[("A1", "3")]);
        grid.insert(
            CellRef::from_label("B1").unwrap(),
            Cell {
                value: "100".to_string(),
                formula: Some("=A1*2".to_string()),
                ..Cell::default()
            },
        );
        assert_eq!(evaluate("=B1+1", &grid), "101");
    }

    #[test]
    fn test_error_cell_reads_as_zero() {
        let grid = grid_with(&[("A1", ERROR_SENTINEL)]);
        assert_eq!(evaluate("=A1+1", &grid), "1");
    }

    #[test]
    fn test_reference_does_not_merge_with_decimal_point() {
        let grid = grid_with(&[("A1", "3"), ("A2", "4")]);
        assert_eq!(evaluate("=1.A1", &grid), ERROR_SENTINEL);
        assert_eq!(evaluate("=A1.5", &grid), ERROR_SENTINEL);
        assert_eq!(evaluate("=2.SUM(A1:A2)", &grid), ERROR_SENTINEL);
        assert_eq!(evaluate("=1.5*A1", &grid), "4.5");
    }
}
