//! Cell address parsing and formatting.
//!
//! Provides bidirectional conversion between canonical spreadsheet addresses
//! (e.g., "A1", "B2", "AZ100") and zero-indexed row/column coordinates.
//! Columns use bijective base-26 (A..Z, AA..AZ, BA..), so no letter stands
//! for zero.
//!
//! # Examples
//!
//! ```
//! use tabula_engine::engine::CellRef;
//!
//! let cell = CellRef::from_label("B3").unwrap();
//! assert_eq!(cell.col, 1); // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::error::AddressError;

/// A reference to a cell by row and column indices (0-indexed).
///
/// Ordering is row-major: all of row 0 sorts before any of row 1.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

pub(crate) fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]+)(?<numbers>[1-9][0-9]*)$")
            .expect("address regex must compile")
    })
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a canonical address. Returns None if the label is not of the
    /// form `^[A-Z]+[1-9][0-9]*$` or does not fit in `usize`.
    pub fn from_label(label: &str) -> Option<CellRef> {
        let caps = address_re().captures(label)?;
        let col = Self::letters_to_col(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(row, col))
    }

    /// Decode bijective base-26 letters back to a zero-based column.
    pub fn letters_to_col(letters: &str) -> Option<usize> {
        if letters.is_empty() {
            return None;
        }
        let mut acc = 0usize;
        for b in letters.bytes() {
            if !b.is_ascii_uppercase() {
                return None;
            }
            let digit = (b - b'A') as usize + 1;
            acc = acc.checked_mul(26)?.checked_add(digit)?;
        }
        acc.checked_sub(1)
    }

    /// Convert column index to letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = Vec::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        result.reverse();
        String::from_utf8(result).unwrap_or_default()
    }
}

impl std::str::FromStr for CellRef {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        if address_re().is_match(s) {
            return CellRef::from_label(s).ok_or_else(|| AddressError::OutOfRange(s.to_string()));
        }
        Err(AddressError::Malformed(s.to_string()))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row as u128 + 1)
    }
}

/// Encode a zero-based (row, col) pair as a canonical address.
pub fn encode(row: usize, col: usize) -> String {
    CellRef::new(row, col).to_string()
}

/// Decode a canonical address into a zero-based (row, col) pair.
pub fn decode(label: &str) -> Option<(usize, usize)> {
    CellRef::from_label(label).map(|r| (r.row, r.col))
}
