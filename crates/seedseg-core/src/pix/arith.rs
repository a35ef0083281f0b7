//! Image arithmetic operations
//!
//! Pixel-wise binary operations between two buffers of identical
//! geometry. Every operation allocates a fresh output; neither input is
//! modified.

use super::Pix;
use crate::error::{Error, Result};

/// Pixel-wise binary operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArithBinaryOp {
    AbsDiff,
    Min,
}

impl Pix {
    /// Compute absolute difference: |self - other|
    ///
    /// Each channel is handled independently. For two {0, 255} masks
    /// this yields the pixels present in exactly one of them.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or channel counts.
    pub fn arith_abs_diff(&self, other: &Pix) -> Result<Pix> {
        self.arith_binary_op(other, ArithBinaryOp::AbsDiff)
    }

    /// Compute pixel-wise minimum: min(self, other)
    ///
    /// For two masks this is their intersection.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or channel counts.
    pub fn arith_min(&self, other: &Pix) -> Result<Pix> {
        self.arith_binary_op(other, ArithBinaryOp::Min)
    }

    /// Check that `other` has exactly the same geometry as `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSizes`] or [`Error::IncompatibleChannels`].
    pub fn check_same_geometry(&self, other: &Pix) -> Result<()> {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }
        if self.channels() != other.channels() {
            return Err(Error::IncompatibleChannels(
                self.channels().count(),
                other.channels().count(),
            ));
        }
        Ok(())
    }

    fn arith_binary_op(&self, other: &Pix, op: ArithBinaryOp) -> Result<Pix> {
        self.check_same_geometry(other)?;

        let mut result = self.create_template().to_mut();
        for ((dst, &a), &b) in result
            .data_mut()
            .iter_mut()
            .zip(self.data())
            .zip(other.data())
        {
            *dst = match op {
                ArithBinaryOp::AbsDiff => a.abs_diff(b),
                ArithBinaryOp::Min => a.min(b),
            };
        }
        Ok(result.into())
    }
}
