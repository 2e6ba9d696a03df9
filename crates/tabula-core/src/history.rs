//! Linear undo/redo history of whole-grid snapshots.
//!
//! `snapshots[cursor]` is always the live grid after a `record`, `undo` or
//! `redo`. Recording a new snapshot discards everything after the cursor, so
//! a fresh edit destroys the redo branch.

use tabula_engine::engine::Grid;

pub struct History {
    snapshots: Vec<Grid>,
    cursor: usize,
    /// Maximum number of snapshots kept; `None` keeps everything.
    limit: Option<usize>,
}

impl History {
    /// Start a history whose first snapshot is `initial`.
    pub fn new(initial: Grid) -> Self {
        History {
            snapshots: vec![initial],
            cursor: 0,
            limit: None,
        }
    }

    /// Like [`History::new`], but evicts the oldest snapshots beyond `limit`.
    /// A limit of zero is treated as one (only the live state is kept).
    pub fn with_limit(initial: Grid, limit: Option<usize>) -> Self {
        let mut history = History::new(initial);
        history.limit = limit.map(|n| n.max(1));
        history
    }

    /// Append a copy of `grid`, dropping any redo branch.
    pub fn record(&mut self, grid: &Grid) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(grid.clone());
        self.cursor = self.snapshots.len() - 1;

        if let Some(limit) = self.limit
            && self.snapshots.len() > limit
        {
            let excess = self.snapshots.len() - limit;
            self.snapshots.drain(..excess);
            self.cursor -= excess;
            tracing::debug!(evicted = excess, limit, "history snapshots evicted");
        }
    }

    /// Step back one snapshot and return a copy of it.
    pub fn undo(&mut self) -> Option<Grid> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Step forward one snapshot and return a copy of it.
    pub fn redo(&mut self) -> Option<Grid> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.snapshots[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Grid {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(Grid::new())
    }
}
