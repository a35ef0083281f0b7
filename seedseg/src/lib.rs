//! seedseg - Seeded region segmentation for Rust
//!
//! Grows a region of similar color from a seed pixel, outlines it and
//! optionally smooths the outline.
//!
//! # Overview
//!
//! - Image I/O (PNG, binary PGM/PPM)
//! - Seeded color flood fill with opening/closing refinement
//! - 3×3 mask morphology and perimeter extraction
//! - 3×3 Gaussian smoothing
//! - [`SegmentationSession`]: the staged pipeline tying them together
//!
//! # Example
//!
//! ```
//! use seedseg::{Channels, ColorSample, OutputType, PixMut, SegmentationSession};
//!
//! let mut pm = PixMut::new(10, 10, Channels::Rgb).unwrap();
//! pm.fill_color(ColorSample::new(255, 255, 255)).unwrap();
//!
//! let mut session = SegmentationSession::new();
//! session.load(pm.into()).unwrap();
//! session.compute_region(5, 5, 10).unwrap();
//! session.compute_perimeter().unwrap();
//!
//! let perimeter = session.mask(OutputType::Perimeter).unwrap();
//! assert_eq!(perimeter.count_foreground(), 20);
//! ```

mod error;
pub mod session;

// Re-export core types (primary data structures used everywhere)
pub use seedseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use seedseg_filter as filter;
pub use seedseg_io as io;
pub use seedseg_morph as morph;
pub use seedseg_region as region;

pub use error::{ErrorKind, Prerequisite, SessionError, SessionResult, Status};
pub use session::{OutputType, SegmentationSession, SessionConfig, Stage};
