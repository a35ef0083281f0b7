//! seedseg-region - Seeded region growing for seedseg
//!
//! Grows a 1-channel {0, 255} region mask from a seed pixel of a color
//! image:
//!
//! - [`flood_fill`]: 4-way color flood fill with a per-channel tolerance
//! - [`refine_region`]: opening followed by closing
//! - [`grow_region`]: both, configured by [`GrowOptions`]

mod error;
pub mod floodfill;

pub use error::{RegionError, RegionResult};
pub use floodfill::{DEFAULT_TOLERANCE, GrowOptions, flood_fill, grow_region, refine_region};
