//! Error types for seedseg-region

use thiserror::Error;

/// Errors that can occur while growing a region
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] seedseg_core::Error),

    /// Error from the refinement morphology
    #[error("morphology error: {0}")]
    Morph(#[from] seedseg_morph::MorphError),

    /// Input buffer has the wrong channel layout
    #[error("unsupported format: expected {expected}, got {actual} channel(s)")]
    UnsupportedFormat { expected: &'static str, actual: u32 },

    /// Seed does not address a pixel of the image
    #[error("seed ({x}, {y}) outside {width}x{height} image")]
    SeedOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
