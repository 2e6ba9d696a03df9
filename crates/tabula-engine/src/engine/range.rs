//! Rectangular cell ranges such as `A1:B5`.

use super::cell::Grid;
use super::cell_ref::CellRef;
use super::format::parse_number;

/// A normalized rectangle of cells; corners are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl CellRange {
    /// Build a range from any two opposite corners.
    pub fn new(a: CellRef, b: CellRef) -> CellRange {
        CellRange {
            min_row: a.row.min(b.row),
            max_row: a.row.max(b.row),
            min_col: a.col.min(b.col),
            max_col: a.col.max(b.col),
        }
    }

    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        (self.min_row..=self.max_row).contains(&cell_ref.row)
            && (self.min_col..=self.max_col).contains(&cell_ref.col)
    }

    /// Numeric values of the populated cells inside the rectangle, in
    /// row-major order. Cells whose value does not parse as a number are
    /// skipped; absent cells contribute nothing.
    ///
    /// Walks only populated entries, so huge but sparse ranges stay cheap.
    pub fn numeric_values(&self, grid: &Grid) -> Vec<f64> {
        let lo = CellRef::new(self.min_row, 0);
        let hi = CellRef::new(self.max_row, usize::MAX);
        grid.range(lo..=hi)
            .filter(|(cell_ref, _)| self.contains(cell_ref))
            .filter_map(|(_, cell)| parse_number(&cell.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cell::Cell;

    fn range(start: &str, end: &str) -> CellRange {
        CellRange::new(
            CellRef::from_label(start).unwrap(),
            CellRef::from_label(end).unwrap(),
        )
    }

    #[test]
    fn test_new_normalizes_corners() {
        let expected = CellRange {
            min_row: 0,
            max_row: 4,
            min_col: 0,
            max_col: 1,
        };
        assert_eq!(range("B5", "A1"), expected);
        assert_eq!(range("A5", "B1"), expected);
        assert!(expected.contains(&CellRef::new(4, 1)));
        assert!(!expected.contains(&CellRef::new(5, 0)));
    }

    #[test]
    fn test_numeric_values_skip_outside_and_text() {
        let mut grid = Grid::new();
        grid.insert(CellRef::new(0, 0), Cell::new_literal("1"));
        grid.insert(CellRef::new(1, 0), Cell::new_literal("abc"));
        grid.insert(CellRef::new(1, 1), Cell::new_literal("5")); // B2, outside A1:A3
        grid.insert(CellRef::new(2, 0), Cell::new_literal("2"));
        let range = range("A1", "A3");
        assert_eq!(range.numeric_values(&grid), vec![1.0, 2.0]);
    }

    #[test]
    fn test_numeric_values_large_sparse_range() {
        let mut grid = Grid::new();
        grid.insert(CellRef::new(999_999, 0), Cell::new_literal("4"));
        let range = range("A1", "ZZ1000000");
        assert_eq!(range.numeric_values(&grid), vec![4.0]);
    }
}
