//! seedseg-filter - Mask smoothing for seedseg
//!
//! Provides a small [`Kernel`] type and the 3×3 Gaussian smoother used
//! to soften extracted perimeters.

mod error;
pub mod kernel;
pub mod smooth;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;
pub use smooth::{BRIGHTNESS_COMPENSATION, FILTER_SIZE, convolve_3x3, smooth_gaussian};
