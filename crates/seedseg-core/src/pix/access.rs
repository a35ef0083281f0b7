//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Gray accessors address 1-channel buffers; color accessors address
//! 3-channel buffers. Using the wrong accessor for a layout returns
//! `None` (getters) or an error (setters).

use super::{Channels, ColorSample, Pix, PixMut};
use crate::error::{Error, Result};

#[inline]
fn offset(width: u32, channels: Channels, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * channels.count() as usize
}

impl Pix {
    /// Get a gray sample at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds or the buffer is
    /// not 1-channel.
    pub fn get_gray(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() || !self.is_gray() {
            return None;
        }
        Some(self.data()[offset(self.width(), Channels::Gray, x, y)])
    }

    /// Get a gray sample without bounds checking beyond slice indexing.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset is outside the sample buffer.
    #[inline]
    pub fn get_gray_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[offset(self.width(), Channels::Gray, x, y)]
    }

    /// Get a color sample at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds or the buffer is
    /// not 3-channel.
    pub fn get_color(&self, x: u32, y: u32) -> Option<ColorSample> {
        if x >= self.width() || y >= self.height() || self.channels() != Channels::Rgb {
            return None;
        }
        let i = offset(self.width(), Channels::Rgb, x, y);
        let d = self.data();
        Some(ColorSample::new(d[i], d[i + 1], d[i + 2]))
    }
}

impl PixMut {
    /// Get a gray sample at (x, y).
    pub fn get_gray(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() || self.channels() != Channels::Gray {
            return None;
        }
        Some(self.data()[offset(self.width(), Channels::Gray, x, y)])
    }

    /// Set a gray sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds
    /// and [`Error::UnsupportedChannels`] for a color buffer.
    pub fn set_gray(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        self.check_bounds(x, y)?;
        if self.channels() != Channels::Gray {
            return Err(Error::UnsupportedChannels(self.channels().count()));
        }
        let i = offset(self.width(), Channels::Gray, x, y);
        self.data_mut()[i] = value;
        Ok(())
    }

    /// Set a gray sample without the bounds check.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset is outside the sample buffer.
    #[inline]
    pub fn set_gray_unchecked(&mut self, x: u32, y: u32, value: u8) {
        let i = offset(self.width(), Channels::Gray, x, y);
        self.data_mut()[i] = value;
    }

    /// Set a color sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds
    /// and [`Error::UnsupportedChannels`] for a gray buffer.
    pub fn set_color(&mut self, x: u32, y: u32, color: ColorSample) -> Result<()> {
        self.check_bounds(x, y)?;
        if self.channels() != Channels::Rgb {
            return Err(Error::UnsupportedChannels(self.channels().count()));
        }
        let i = offset(self.width(), Channels::Rgb, x, y);
        let d = self.data_mut();
        d[i] = color.red;
        d[i + 1] = color.green;
        d[i + 2] = color.blue;
        Ok(())
    }

    /// Fill every pixel with one color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for a gray buffer.
    pub fn fill_color(&mut self, color: ColorSample) -> Result<()> {
        if self.channels() != Channels::Rgb {
            return Err(Error::UnsupportedChannels(self.channels().count()));
        }
        for px in self.data_mut().chunks_exact_mut(3) {
            px[0] = color.red;
            px[1] = color.green;
            px[2] = color.blue;
        }
        Ok(())
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }
}
