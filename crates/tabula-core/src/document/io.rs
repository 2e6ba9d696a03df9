use super::Document;
use super::ops::resolve_input;
use tabula_engine::engine::{CellRef, Grid, display_value};

impl Document {
    /// Replace the grid with row-major tabular data.
    ///
    /// `rows[r][c]` lands at `encode(r, c)`. Empty strings are skipped; text
    /// starting with `=` is evaluated as a formula against the cells loaded
    /// before it. The whole load records a single history snapshot.
    /// Returns the number of cells written.
    pub fn load_rows<S: AsRef<str>>(&mut self, rows: &[Vec<S>]) -> usize {
        let mut grid = Grid::new();
        for (row, fields) in rows.iter().enumerate() {
            for (col, field) in fields.iter().enumerate() {
                let raw = field.as_ref();
                if raw.is_empty() {
                    continue;
                }
                let cell_ref = CellRef::new(row, col);
                let cell = resolve_input(&grid, &cell_ref, raw);
                grid.insert(cell_ref, cell);
            }
        }
        let count = grid.len();
        tracing::debug!(cells = count, rows = rows.len(), "bulk load");
        self.grid = grid;
        self.record();
        count
    }

    /// Smallest `(rows, cols)` rectangle anchored at A1 covering every
    /// populated cell.
    pub fn extent(&self) -> (usize, usize) {
        self.grid.keys().fold((0, 0), |(rows, cols), cell_ref| {
            (
                rows.max(cell_ref.row.saturating_add(1)),
                cols.max(cell_ref.col.saturating_add(1)),
            )
        })
    }

    /// Displayed values of the `rows` x `cols` rectangle anchored at A1,
    /// with `""` for absent cells.
    pub fn to_rows(&self, rows: usize, cols: usize) -> Vec<Vec<String>> {
        (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| display_value(&self.grid, &CellRef::new(row, col)))
                    .collect()
            })
            .collect()
    }
}
