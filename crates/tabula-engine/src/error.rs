//! Error types for the Tabula engine.

use thiserror::Error;

/// A textual address that is not of the form `^[A-Z]+[1-9][0-9]*$`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Empty cell address")]
    Empty,

    #[error("Invalid cell address: {0}")]
    Malformed(String),

    #[error("Cell address out of range: {0}")]
    OutOfRange(String),
}

/// Why a formula failed to evaluate.
///
/// Positions are byte offsets into the expression after `=` was stripped and
/// references were substituted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Formula must start with '='")]
    MissingEquals,

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unmatched parenthesis at {pos}")]
    UnmatchedParen { pos: usize },

    #[error("Unexpected input at {pos}")]
    TrailingInput { pos: usize },

    #[error("Invalid number literal at {pos}")]
    InvalidNumber { pos: usize },

    #[error("Result is not a finite number")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, EvalError>;
