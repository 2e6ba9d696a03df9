use crate::history::History;
use tabula_engine::engine::{Cell, CellRef, Grid, display_value};

/// UI-agnostic document state for the spreadsheet.
///
/// Owns the sparse cell store and its undo history. Every mutating
/// operation records one history snapshot once it has completed.
pub struct Document {
    /// The spreadsheet grid
    pub(crate) grid: Grid,
    /// Snapshots of `grid`, one per committed edit
    pub(crate) history: History,
}

impl Document {
    /// Create an empty document with unbounded history.
    pub fn new() -> Self {
        Self::with_history_limit(None)
    }

    /// Create an empty document keeping at most `limit` history snapshots.
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        let grid = Grid::new();
        let history = History::with_limit(grid.clone(), limit);
        Document { grid, history }
    }

    /// Read-only view of the cell store.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn get(&self, cell_ref: &CellRef) -> Option<&Cell> {
        self.grid.get(cell_ref)
    }

    /// Displayed value of a cell, `""` when absent.
    pub fn get_display(&self, cell_ref: &CellRef) -> String {
        display_value(&self.grid, cell_ref)
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub(crate) fn record(&mut self) {
        self.history.record(&self.grid);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
