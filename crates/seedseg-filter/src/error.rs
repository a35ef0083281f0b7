//! Error types for seedseg-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] seedseg_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Unsupported channel layout for this operation
    #[error("unsupported format: expected {expected}, got {actual} channel(s)")]
    UnsupportedFormat {
        /// Expected layout description
        expected: &'static str,
        /// Actual channel count
        actual: u32,
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
