use thiserror::Error;

/// Errors returned by the resolution engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Parameter value outside its defined domain.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Vectors in one batch have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// Failure reported by an external embedding source.
    #[error("embedding source: {0}")]
    Source(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
