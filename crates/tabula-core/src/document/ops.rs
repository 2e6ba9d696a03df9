use super::Document;
use crate::error::{CoreError, Result};
use tabula_engine::engine::{Cell, CellRef, Grid, StyleChange, evaluate};

/// Compute the stored cell for `raw` at `cell_ref`, keeping any existing style.
///
/// Formulas are evaluated against `grid` as it is before the write, so a
/// formula that reads its own address sees the previous value.
pub(crate) fn resolve_input(grid: &Grid, cell_ref: &CellRef, raw: &str) -> Cell {
    let mut cell = grid.get(cell_ref).cloned().unwrap_or_default();
    if raw.starts_with('=') {
        cell.value = evaluate(raw, grid);
        cell.formula = Some(raw.to_string());
    } else {
        cell.value = raw.to_string();
        cell.formula = None;
    }
    cell
}

impl Document {
    /// Commit raw user input to a cell and record a history snapshot.
    ///
    /// Text starting with `=` is stored as a formula and its value computed
    /// now; anything else is stored verbatim. Never fails: evaluation errors
    /// are stored as `#ERROR`.
    pub fn commit(&mut self, cell_ref: CellRef, raw: &str) -> Cell {
        let cell = resolve_input(&self.grid, &cell_ref, raw);
        tracing::debug!(cell = %cell_ref, value = %cell.value, formula = cell.is_formula(), "commit");
        self.grid.insert(cell_ref, cell.clone());
        self.record();
        cell
    }

    /// [`Document::commit`] addressed by label, rejecting malformed labels.
    pub fn commit_label(&mut self, label: &str, raw: &str) -> Result<Cell> {
        let cell_ref: CellRef = label.parse()?;
        Ok(self.commit(cell_ref, raw))
    }

    /// Remove a cell entirely. Returns the removed cell; clearing an absent
    /// cell is a no-op and records nothing.
    pub fn clear(&mut self, cell_ref: &CellRef) -> Option<Cell> {
        let removed = self.grid.remove(cell_ref)?;
        tracing::debug!(cell = %cell_ref, "clear");
        self.record();
        Some(removed)
    }

    /// Merge one style attribute into a cell without touching its value or
    /// formula, creating an empty cell when needed. Records a snapshot.
    pub fn apply_style(&mut self, cell_ref: CellRef, change: StyleChange) -> Cell {
        tracing::debug!(cell = %cell_ref, ?change, "apply style");
        let cell = self.grid.entry(cell_ref).or_default();
        cell.style.apply(change);
        let cell = cell.clone();
        self.record();
        cell
    }

    /// [`Document::apply_style`] from textual address, key and value.
    pub fn apply_style_label(&mut self, label: &str, key: &str, value: &str) -> Result<Cell> {
        let cell_ref: CellRef = label.parse()?;
        let change = StyleChange::parse(key, value).ok_or_else(|| CoreError::InvalidStyle {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        Ok(self.apply_style(cell_ref, change))
    }

    /// Restore the previous snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(grid) => {
                self.grid = grid;
                tracing::debug!(cursor = self.history.cursor(), "undo");
                true
            }
            None => {
                tracing::debug!("nothing to undo");
                false
            }
        }
    }

    /// Re-apply the next snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(grid) => {
                self.grid = grid;
                tracing::debug!(cursor = self.history.cursor(), "redo");
                true
            }
            None => {
                tracing::debug!("nothing to redo");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::error::CoreError;
    use pretty_assertions::assert_eq;
    use tabula_engine::AddressError;
    use tabula_engine::engine::{Align, Cell, CellRef, StyleChange};

    fn at(label: &str) -> CellRef {
        CellRef::from_label(label).unwrap()
    }

    #[test]
    fn test_commit_literal_and_formula() {
        let mut doc = Document::new();
        doc.commit(at("A1"), "3");
        doc.commit(at("A2"), "4");
        let cell = doc.commit(at("A3"), "=A1+A2");
        assert_eq!(cell.value, "7");
        assert_eq!(cell.formula.as_deref(), Some("=A1+A2"));
        assert_eq!(doc.get(&at("A1")).unwrap().formula, None);
    }

    #[test]
    fn test_commit_same_literal_twice_records_twice() {
        let mut doc = Document::new();
        let first = doc.commit(at("B2"), "hello");
        let second = doc.commit(at("B2"), "hello");
        assert_eq!(first, second);
        // initial snapshot + two commits
        assert_eq!(doc.history().len(), 3);
    }

    #[test]
    fn test_stale_reference_until_recommitted() {
        let mut doc = Document::new();
        doc.commit(at("A1"), "3");
        doc.commit(at("A2"), "4");
        doc.commit(at("A3"), "=A1+A2");
        doc.commit(at("A1"), "10");
        assert_eq!(doc.get_display(&at("A3")), "7");

        doc.commit(at("A3"), "=A1+A2");
        assert_eq!(doc.get_display(&at("A3")), "14");
    }

    #[test]
    fn test_self_reference_reads_previous_value() {
        let mut doc = Document::new();
        assert_eq!(doc.commit(at("A1"), "=A1+1").value, "1");
        assert_eq!(doc.commit(at("A1"), "=A1+1").value, "2");
    }

    #[test]
    fn test_range_excludes_text() {
        let mut doc = Document::new();
        doc.commit(at("A1"), "1");
        doc.commit(at("A2"), "2");
        doc.commit(at("A3"), "abc");
        assert_eq!(doc.commit(at("A4"), "=SUM(A1:A3)").value, "3");
        assert_eq!(doc.commit(at("A5"), "=AVERAGE(A1:A3)").value, "1.5");
    }

    #[test]
    fn test_error_sentinel_stored() {
        let mut doc = Document::new();
        let cell = doc.commit(at("C3"), "=1/0");
        assert_eq!(cell.value, "#ERROR");
        assert_eq!(cell.formula.as_deref(), Some("=1/0"));
    }

    #[test]
    fn test_undo_redo_symmetry() {
        let mut doc = Document::new();
        doc.commit(at("A1"), "a");
        doc.commit(at("A1"), "b");
        let after_b = doc.grid().clone();

        assert!(doc.undo());
        assert_eq!(doc.get_display(&at("A1")), "a");
        assert!(doc.redo());
        assert_eq!(doc.grid(), &after_b);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut doc = Document::new();
        doc.commit(at("A1"), "a");
        doc.commit(at("A1"), "b");
        doc.undo();
        doc.commit(at("A1"), "c");
        let live = doc.grid().clone();

        assert!(!doc.can_redo());
        assert!(!doc.redo());
        assert_eq!(doc.grid(), &live);
    }

    #[test]
    fn test_first_edit_is_undoable() {
        let mut doc = Document::new();
        doc.commit(at("A1"), "x");
        assert!(doc.undo());
        assert!(doc.is_empty());
        assert!(!doc.undo());
    }

    #[test]
    fn test_history_cursor_matches_live_grid() {
        let mut doc = Document::new();
        doc.commit(at("A1"), "1");
        doc.apply_style(at("A1"), StyleChange::Bold(true));
        doc.clear(&at("A1"));
        assert_eq!(doc.history().current(), doc.grid());
        doc.undo();
        assert_eq!(doc.history().current(), doc.grid());
        doc.redo();
        assert_eq!(doc.history().current(), doc.grid());
    }

    #[test]
    fn test_clear_removes_entry() {
        let mut doc = Document::new();
        doc.commit(at("A1"), "1");
        doc.commit(at("A2"), "");
        assert!(doc.get(&at("A2")).is_some());

        assert_eq!(doc.clear(&at("A1")), Some(Cell::new_literal("1")));
        assert!(doc.get(&at("A1")).is_none());
        assert_eq!(doc.get_display(&at("A1")), "");
        assert_eq!(doc.get_display(&at("A2")), "");

        let len = doc.history().len();
        assert_eq!(doc.clear(&at("Z9")), None);
        assert_eq!(doc.history().len(), len);
    }

    #[test]
    fn test_apply_style_keeps_value_and_formula() {
        let mut doc = Document::new();
        doc.commit(at("A1"), "2");
        doc.commit(at("B1"), "=A1*3");
        let cell = doc.apply_style(at("B1"), StyleChange::Align(Align::Right));
        assert_eq!(cell.value, "6");
        assert_eq!(cell.formula.as_deref(), Some("=A1*3"));
        assert_eq!(cell.style.align, Some(Align::Right));

        // Style survives a later commit.
        let cell = doc.commit(at("B1"), "plain");
        assert_eq!(cell.style.align, Some(Align::Right));
    }

    #[test]
    fn test_apply_style_creates_empty_cell() {
        let mut doc = Document::new();
        let cell = doc.apply_style(at("D4"), StyleChange::Italic(true));
        assert_eq!(cell.value, "");
        assert_eq!(cell.formula, None);
        assert_eq!(cell.style.italic, Some(true));
        assert_eq!(doc.history().len(), 2);
    }

    #[test]
    fn test_label_operations_validate_input() {
        let mut doc = Document::new();
        assert_eq!(doc.commit_label("B2", "5").unwrap().value, "5");
        assert_eq!(
            doc.commit_label("b2", "5"),
            Err(CoreError::Address(AddressError::Malformed("b2".to_string())))
        );
        assert!(matches!(
            doc.apply_style_label("B2", "bold", "maybe"),
            Err(CoreError::InvalidStyle { .. })
        ));
        let cell = doc.apply_style_label("B2", "color", "#336699").unwrap();
        assert_eq!(cell.style.color.as_deref(), Some("#336699"));
        // Rejected input touches neither the store nor the history.
        assert_eq!(doc.history().len(), 3);
    }
}
