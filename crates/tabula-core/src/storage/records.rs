//! Row-record export for downstream consumers.
//!
//! Row 1 supplies the headers; each later row becomes one record mapping
//! header to displayed value. Rows with no non-empty value are dropped.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tabula_engine::engine::{CellRef, Grid, display_value};

use crate::document::Document;

/// Prefix of the synthetic header used when a header cell is missing or empty.
pub const SYNTHETIC_HEADER_PREFIX: &str = "Column";

/// One exported row: header -> value, in column order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowRecord {
    fields: Vec<(String, String)>,
}

impl RowRecord {
    /// Set `header` to `value`. A repeated header keeps its first position
    /// and takes the latest value.
    pub fn insert(&mut self, header: &str, value: String) {
        match self.fields.iter_mut().find(|(h, _)| h == header) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((header.to_string(), value)),
        }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut record = RowRecord::default();
        for (header, value) in iter {
            record.insert(header, value.to_string());
        }
        record
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (header, value) in &self.fields {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

/// Header labels from row 1 across `col_count` columns.
pub fn header_labels(grid: &Grid, col_count: usize) -> Vec<String> {
    (0..col_count)
        .map(|col| {
            let label = display_value(grid, &CellRef::new(0, col));
            if label.is_empty() {
                format!("{}{}", SYNTHETIC_HEADER_PREFIX, col + 1)
            } else {
                label
            }
        })
        .collect()
}

/// Column layout of one export: unique headers in first-seen order, and for
/// every column the slot its value lands in.
struct HeaderLayout {
    headers: Vec<String>,
    slot_of_col: Vec<usize>,
    /// Highest column feeding each slot; that column's value wins.
    source_col: Vec<usize>,
}

impl HeaderLayout {
    fn new(labels: Vec<String>) -> Self {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(labels.len());
        let mut headers = Vec::new();
        let mut source_col = Vec::new();
        let mut slot_of_col = Vec::with_capacity(labels.len());
        for (col, label) in labels.into_iter().enumerate() {
            let slot = match index.get(&label) {
                Some(&slot) => {
                    source_col[slot] = col;
                    slot
                }
                None => {
                    let slot = headers.len();
                    index.insert(label.clone(), slot);
                    headers.push(label);
                    source_col.push(col);
                    slot
                }
            };
            slot_of_col.push(slot);
        }
        HeaderLayout {
            headers,
            slot_of_col,
            source_col,
        }
    }
}

/// Export the `row_count` x `col_count` rectangle anchored at A1 as records.
///
/// `row_count` includes the header row. Records keep row order. A row is
/// dropped only when none of its cells in the rectangle holds a value, even
/// if a repeated header hides some of them in the record.
pub fn export_records(grid: &Grid, row_count: usize, col_count: usize) -> Vec<RowRecord> {
    if row_count == 0 || col_count == 0 {
        return Vec::new();
    }
    let layout = HeaderLayout::new(header_labels(grid, col_count));

    (1..row_count)
        .filter_map(|row| {
            let mut values = vec![String::new(); layout.headers.len()];
            let mut has_content = false;
            // Only populated cells are visited, so wide sparse rows stay cheap.
            let lo = CellRef::new(row, 0);
            let hi = CellRef::new(row, col_count - 1);
            for (cell_ref, cell) in grid.range(lo..=hi) {
                if cell.value.is_empty() {
                    continue;
                }
                has_content = true;
                let slot = layout.slot_of_col[cell_ref.col];
                if layout.source_col[slot] == cell_ref.col {
                    values[slot] = cell.value.clone();
                }
            }
            has_content.then(|| RowRecord {
                fields: layout.headers.iter().cloned().zip(values).collect(),
            })
        })
        .collect()
}

impl Document {
    /// Export row records over an explicit rectangle, or over the populated
    /// extent when `dims` is None.
    pub fn export_records(&self, dims: Option<(usize, usize)>) -> Vec<RowRecord> {
        let (rows, cols) = dims.unwrap_or_else(|| self.extent());
        export_records(&self.grid, rows, cols)
    }
}
