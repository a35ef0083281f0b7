//! seedseg-morph - Mask morphology for seedseg
//!
//! This crate provides the 3×3 square-element operations used to refine
//! grown regions and outline them:
//!
//! - Binary morphology: erosion, dilation, opening, closing
//! - Perimeter extraction: region minus its erosion
//!
//! All operations take 1-channel {0, 255} masks, leave the input
//! untouched, and never write the outermost row or column.

pub mod binary;
mod error;
pub mod perimeter;

pub use binary::{NEIGHBORHOOD_SIZE, close, dilate, erode, open};
pub use error::{MorphError, MorphResult};
pub use perimeter::extract_perimeter;
