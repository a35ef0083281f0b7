//! Convolution kernels

use crate::{FilterError, FilterResult};

/// Weights of the 3×3 Gaussian smoothing kernel, row-major.
const GAUSSIAN_3X3: [f32; 9] = [
    0.0625, 0.125, 0.0625, //
    0.125, 0.25, 0.125, //
    0.0625, 0.125, 0.0625, //
];

/// A 2D convolution kernel with odd dimensions
///
/// The center element sits at `(width / 2, height / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    width: u32,
    height: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from a slice of row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if a dimension is zero or
    /// even, or if `data` does not hold exactly `width * height` values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        if width == 0 || height == 0 || width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "dimensions must be odd and non-zero, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "expected {expected} values, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: data.to_vec(),
        })
    }

    /// The fixed 3×3 Gaussian kernel (weights sum to 1).
    pub fn gaussian_3x3() -> Self {
        Self {
            width: 3,
            height: 3,
            data: GAUSSIAN_3X3.to_vec(),
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the kernel has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the element at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Row-major element slice.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}
