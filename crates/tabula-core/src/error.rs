//! Error types for Tabula core.

use tabula_engine::AddressError;
use thiserror::Error;

/// Errors raised when textual input is rejected before reaching the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Invalid style {key}={value}")]
    InvalidStyle { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
