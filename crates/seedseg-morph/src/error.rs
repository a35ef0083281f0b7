//! Error types for seedseg-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] seedseg_core::Error),

    /// Input is not a 1-channel buffer
    #[error("unsupported format: expected {expected}, got {actual} channel(s)")]
    UnsupportedFormat { expected: &'static str, actual: u32 },
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
