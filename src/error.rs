//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building, parsing or writing LUTs.
#[derive(Debug, Error)]
pub enum LutError {
    /// Malformed or unexpected file content: wrong magic, wrong kind,
    /// unparsable numbers, element-count mismatches.
    #[error("parse error: {0}")]
    Parse(String),

    /// A table size outside the range the format can represent.
    #[error("{what} size {size} outside [{min}, {max}]")]
    SizeBounds {
        /// Which table the size belongs to ("shaper" or "cube").
        what: &'static str,
        /// The offending size.
        size: usize,
        /// Smallest legal size.
        min: usize,
        /// Largest legal size.
        max: usize,
    },

    /// A LUT shape or combination of shapes the format cannot express.
    #[error("unsupported LUT shape: {0}")]
    UnsupportedShape(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
