//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error)]
pub enum LutError {
    /// Invalid LUT or grid size.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Invalid log2 sampling range.
    #[error("invalid log2 range: [{min}, {max}]")]
    InvalidRange {
        /// Lower log2 bound
        min: f64,
        /// Upper log2 bound
        max: f64,
    },

    /// Parse error when loading `.cube` files.
    #[error("parse error: {0}")]
    ParseError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
