//! seedseg Core - Basic data structures for seeded segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the seedseg workspace:
//!
//! - [`Pix`] / [`PixMut`] - The 8-bit image container (immutable / mutable)
//! - [`Channels`] - Sample layout (1-channel gray or 3-channel color)
//! - [`ColorSample`] - A single RGB sample used for tolerance comparison
//! - [`ImageFormat`] - Codec identifiers shared by the I/O crate
//!
//! Masks are 1-channel buffers holding only [`mask::FOREGROUND`] and
//! [`mask::BACKGROUND`].

pub mod error;
pub mod pix;

pub use error::{Error, Result};
pub use pix::{Channels, ColorSample, ImageFormat, MAX_PIXELS, Pix, PixMut};

/// Sentinel values for binary masks stored in 1-channel buffers.
pub mod mask {
    /// Value of a pixel that belongs to the mask.
    pub const FOREGROUND: u8 = 255;
    /// Value of a pixel outside the mask.
    pub const BACKGROUND: u8 = 0;

    /// Check whether a sample is a mask foreground pixel.
    #[inline]
    pub fn is_foreground(value: u8) -> bool {
        value == FOREGROUND
    }
}
