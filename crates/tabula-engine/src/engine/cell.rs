//! Cell data structures for the spreadsheet grid.
//!
//! - [`Cell`] - displayed value, optional source formula, and style
//! - [`CellStyle`] - presentational attributes, orthogonal to the value
//! - [`StyleChange`] - a single style attribute update
//! - [`Grid`] - sparse, row-major ordered cell storage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::cell_ref::CellRef;

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn parse(s: &str) -> Option<Align> {
        match s {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }
}

/// Presentational attributes of a cell. Unset attributes are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub align: Option<Align>,
    pub background_color: Option<String>,
    pub color: Option<String>,
}

/// One style attribute assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleChange {
    Bold(bool),
    Italic(bool),
    Underline(bool),
    Align(Align),
    BackgroundColor(String),
    Color(String),
}

impl StyleChange {
    /// Build a change from a textual key/value pair.
    ///
    /// Keys: `bold`, `italic`, `underline` (value `true`/`false`), `align`
    /// (`left`/`center`/`right`), `backgroundColor`, `color` (any non-empty text).
    pub fn parse(key: &str, value: &str) -> Option<StyleChange> {
        let flag = || value.parse::<bool>().ok();
        match key {
            "bold" => flag().map(StyleChange::Bold),
            "italic" => flag().map(StyleChange::Italic),
            "underline" => flag().map(StyleChange::Underline),
            "align" => Align::parse(value).map(StyleChange::Align),
            "backgroundColor" if !value.is_empty() => {
                Some(StyleChange::BackgroundColor(value.to_string()))
            }
            "color" if !value.is_empty() => Some(StyleChange::Color(value.to_string())),
            _ => None,
        }
    }
}

impl CellStyle {
    /// Merge one attribute into this style, leaving the others untouched.
    pub fn apply(&mut self, change: StyleChange) {
        match change {
            StyleChange::Bold(b) => self.bold = Some(b),
            StyleChange::Italic(b) => self.italic = Some(b),
            StyleChange::Underline(b) => self.underline = Some(b),
            StyleChange::Align(a) => self.align = Some(a),
            StyleChange::BackgroundColor(c) => self.background_color = Some(c),
            StyleChange::Color(c) => self.color = Some(c),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CellStyle::default()
    }
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Displayed content: a literal, a computed formula result, or `#ERROR`.
    pub value: String,
    /// The committed input, verbatim, when it began with `=`.
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "CellStyle::is_empty")]
    pub style: CellStyle,
}

impl Cell {
    pub fn new_literal(text: &str) -> Cell {
        Cell {
            value: text.to_string(),
            ..Cell::default()
        }
    }

    pub fn is_formula(&self) -> bool {
        self.formula.is_some()
    }
}

/// Sparse grid storage. Absent addresses are implicitly empty.
pub type Grid = BTreeMap<CellRef, Cell>;

/// Value of `cell_ref` in string context (`""` when absent).
pub fn display_value(grid: &Grid, cell_ref: &CellRef) -> String {
    grid.get(cell_ref).map(|c| c.value.clone()).unwrap_or_default()
}
