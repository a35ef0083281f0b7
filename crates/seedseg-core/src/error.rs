//! Error types for seedseg-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// seedseg core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Geometry exceeds the supported pixel count
    #[error("image too large: {width}x{height} exceeds {max} pixels")]
    ImageTooLarge { width: u32, height: u32, max: u64 },

    /// Invalid channel count
    #[error("invalid channel count: {0} (expected 1 or 3)")]
    InvalidChannels(u32),

    /// Sample buffer does not match the declared geometry
    #[error("sample buffer length mismatch: expected {expected}, got {actual}")]
    DataLength { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: ({x}, {y}) outside {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Incompatible image sizes
    #[error("incompatible image sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Incompatible channel layouts
    #[error("incompatible channel counts: {0} vs {1}")]
    IncompatibleChannels(u32, u32),

    /// Unsupported channel layout for this operation
    #[error("unsupported channel count for this operation: {0}")]
    UnsupportedChannels(u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
