//! PIX - The main image container
//!
//! `Pix` is the pixel buffer every stage of the segmentation pipeline
//! reads and produces. It holds 8-bit samples in either a 1-channel
//! (grayscale / mask) or 3-channel (RGB) layout.
//!
//! # Pixel layout
//!
//! - Samples are stored row-major, one byte per sample
//! - Rows are tightly packed (no padding)
//! - 3-channel pixels are stored as consecutive `R, G, B` bytes
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, copy into a `PixMut` with [`Pix::to_mut`], then
//! convert back with `Into<Pix>`.

mod access;
pub mod arith;
mod convert;

use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;

/// Number of 8-bit samples per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Single-channel grayscale (also used for binary masks)
    Gray = 1,
    /// Three-channel color, red/green/blue order
    Rgb = 3,
}

impl Channels {
    /// Create `Channels` from a raw sample count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannels`] if `count` is not 1 or 3.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            _ => Err(Error::InvalidChannels(count)),
        }
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn count(self) -> u32 {
        self as u32
    }
}

/// A single color sample: three independent 0-255 channels.
///
/// Only ever compared channel by channel; never blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSample {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorSample {
    /// Create a sample from its three channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Check whether every channel differs from `reference` by strictly
    /// less than `tolerance`.
    ///
    /// A tolerance of 0 therefore never matches, not even an identical color.
    #[inline]
    pub fn within_tolerance(&self, reference: &ColorSample, tolerance: u32) -> bool {
        let within = |a: u8, b: u8| (a as i32 - b as i32).unsigned_abs() < tolerance;
        within(self.red, reference.red)
            && within(self.green, reference.green)
            && within(self.blue, reference.blue)
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// Binary PNM (P5 graymap / P6 pixmap)
    Pnm,
}

impl ImageFormat {
    /// Get the canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Pnm => "pnm",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    ///
    /// Returns [`ImageFormat::Unknown`] for unrecognized or missing extensions.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => Self::Png,
            Some("pnm" | "pgm" | "ppm") => Self::Pnm,
            _ => Self::Unknown,
        }
    }
}

/// Largest pixel count a `Pix` may hold.
pub const MAX_PIXELS: u64 = 1 << 29;

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel
    channels: Channels,
    /// Row-major samples, `width * height * channels` bytes
    data: Vec<u8>,
}

impl PixData {
    /// Geometry must already have passed [`Pix::sample_len`].
    fn zeroed(width: u32, height: u32, channels: Channels) -> Self {
        let len = width as usize * height as usize * channels.count() as usize;
        PixData {
            width,
            height,
            channels,
            data: vec![0u8; len],
        }
    }
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use seedseg_core::{Channels, Pix};
///
/// let pix = Pix::new(640, 480, Channels::Rgb).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.data().len(), 640 * 480 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and channel layout.
    ///
    /// All samples are initialized to zero (mask background).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 and
    /// [`Error::ImageTooLarge`] above [`MAX_PIXELS`] pixels.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Self::sample_len(width, height, channels)?;
        Ok(Pix {
            inner: Arc::new(PixData::zeroed(width, height, channels)),
        })
    }

    /// Number of samples a buffer of this geometry holds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty geometry and
    /// [`Error::ImageTooLarge`] above [`MAX_PIXELS`] pixels.
    pub fn sample_len(width: u32, height: u32, channels: Channels) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let npixels = u64::from(width) * u64::from(height);
        if npixels > MAX_PIXELS {
            return Err(Error::ImageTooLarge {
                width,
                height,
                max: MAX_PIXELS,
            });
        }
        // At most 3 * MAX_PIXELS, within usize on 32-bit targets
        Ok((npixels * u64::from(channels.count())) as usize)
    }

    /// Wrap an existing row-major sample vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty geometry and
    /// [`Error::DataLength`] if `data` does not hold exactly
    /// `width * height * channels` samples.
    pub fn from_raw(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        let expected = Self::sample_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                channels,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Check whether this is a 1-channel buffer.
    #[inline]
    pub fn is_gray(&self) -> bool {
        self.inner.channels == Channels::Gray
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Number of bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * self.inner.channels.count() as usize
    }

    /// Create a new zero-filled PIX with the same geometry as `self`.
    pub fn create_template(&self) -> Self {
        Pix {
            inner: Arc::new(PixData::zeroed(
                self.inner.width,
                self.inner.height,
                self.inner.channels,
            )),
        }
    }

    /// Check if two PIX have the same width, height, and channel layout.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.channels == other.inner.channels
    }

    /// Count samples equal to [`crate::mask::FOREGROUND`].
    ///
    /// Intended for 1-channel masks; on color buffers every channel is counted.
    pub fn count_foreground(&self) -> usize {
        self.inner
            .data
            .iter()
            .filter(|&&v| crate::mask::is_foreground(v))
            .count()
    }

    /// Check whether every sample is zero.
    pub fn is_all_background(&self) -> bool {
        self.inner.data.iter().all(|&v| v == crate::mask::BACKGROUND)
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always copies, so the original is never affected.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a zero-filled mutable buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 and
    /// [`Error::ImageTooLarge`] above [`MAX_PIXELS`] pixels.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Pix::sample_len(width, height, channels)?;
        Ok(PixMut {
            inner: PixData::zeroed(width, height, channels),
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Number of bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * self.inner.channels.count() as usize
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.inner.data[start..start + stride]
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, Channels::Gray).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.channels(), Channels::Gray);
        assert_eq!(pix.stride(), 100);
        assert!(pix.is_all_background());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Pix::new(0, 100, Channels::Gray).is_err());
        assert!(Pix::new(100, 0, Channels::Rgb).is_err());
        assert!(PixMut::new(0, 0, Channels::Rgb).is_err());
    }

    #[test]
    fn test_from_raw_length_check() {
        assert!(Pix::from_raw(2, 2, Channels::Rgb, vec![0; 12]).is_ok());
        let err = Pix::from_raw(2, 2, Channels::Rgb, vec![0; 4]).unwrap_err();
        assert!(matches!(
            err,
            Error::DataLength {
                expected: 12,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::Gray);
        assert_eq!(Channels::from_count(3).unwrap(), Channels::Rgb);
        assert!(Channels::from_count(4).is_err());
    }

    #[test]
    fn test_clone_shares_data() {
        let pix1 = Pix::new(10, 10, Channels::Gray).unwrap();
        let pix2 = pix1.clone();
        assert!(std::ptr::eq(pix1.data().as_ptr(), pix2.data().as_ptr()));
    }

    #[test]
    fn test_geometry_limits() {
        assert!(matches!(
            Pix::new(0, 5, Channels::Gray),
            Err(Error::InvalidDimension { width: 0, height: 5 })
        ));
        assert!(matches!(
            Pix::new(u32::MAX, u32::MAX, Channels::Rgb),
            Err(Error::ImageTooLarge { .. })
        ));
        assert!(matches!(
            PixMut::new(1 << 15, (1 << 14) + 1, Channels::Gray),
            Err(Error::ImageTooLarge { .. })
        ));
        assert_eq!(Pix::sample_len(1 << 15, 1 << 14, Channels::Rgb).unwrap(), 3 << 29);
        assert!(Pix::from_raw(u32::MAX, 2, Channels::Gray, vec![0; 4]).is_err());
    }

    #[test]
    fn test_to_mut_is_independent() {
        let pix = Pix::new(3, 3, Channels::Gray).unwrap();
        let mut pm = pix.to_mut();
        pm.data_mut()[4] = 255;
        assert!(pix.is_all_background());
        let modified: Pix = pm.into();
        assert_eq!(modified.count_foreground(), 1);
    }

    #[test]
    fn test_color_tolerance_is_strict() {
        let seed = ColorSample::new(100, 100, 100);
        assert!(!seed.within_tolerance(&seed, 0));
        assert!(seed.within_tolerance(&seed, 1));
        let near = ColorSample::new(104, 96, 100);
        assert!(near.within_tolerance(&seed, 5));
        assert!(!near.within_tolerance(&seed, 4));
        // All three channels must pass
        let off_blue = ColorSample::new(100, 100, 140);
        assert!(!off_blue.within_tolerance(&seed, 10));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path("a/b/region.PNG"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("mask.pgm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_path("color.ppm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_path("noext"), ImageFormat::Unknown);
    }
}
