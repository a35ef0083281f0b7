//! 3×3 mask smoothing
//!
//! Convolves the interior of a 1-channel buffer with a 3×3 kernel. The
//! outermost row and column on each side are left at zero.
//!
//! The Gaussian smoother rescales every weighted sum twice: it divides
//! by the kernel element count ([`FILTER_SIZE`]) and then multiplies by
//! [`BRIGHTNESS_COMPENSATION`]. The net gain of 4/9 darkens the output
//! relative to a plain normalized Gaussian; existing masks depend on
//! these exact values, so both steps are kept as separate operations.

use crate::{FilterError, FilterResult, Kernel};
use log::debug;
use seedseg_core::Pix;

/// Divisor applied to the Gaussian weighted sum.
pub const FILTER_SIZE: f32 = 9.0;

/// Multiplier applied after dividing by [`FILTER_SIZE`].
pub const BRIGHTNESS_COMPENSATION: f32 = 4.0;

/// Smooth a mask with the fixed 3×3 Gaussian kernel
///
/// Each interior output sample is
/// `trunc((Σ kernel × neighborhood) / 9 × 4)`. A lone FOREGROUND pixel
/// becomes 28 at its center, 14 at its edge neighbors and 7 at its
/// corner neighbors.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedFormat`] for a non 1-channel input.
pub fn smooth_gaussian(pix: &Pix) -> FilterResult<Pix> {
    let kernel = Kernel::gaussian_3x3();
    let out = apply_kernel_3x3(pix, &kernel, |sum| {
        let averaged = sum / FILTER_SIZE;
        averaged * BRIGHTNESS_COMPENSATION
    })?;
    debug!(
        "gaussian smooth: {}x{}, {} -> {} full-intensity samples",
        pix.width(),
        pix.height(),
        pix.count_foreground(),
        out.count_foreground()
    );
    Ok(out)
}

/// Convolve the interior of a 1-channel buffer with an arbitrary 3×3 kernel
///
/// Weighted sums are truncated to `u8`; negative sums clamp to 0 and
/// sums above 255 clamp to 255.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] if `kernel` is not 3×3 and
/// [`FilterError::UnsupportedFormat`] for a non 1-channel input.
pub fn convolve_3x3(pix: &Pix, kernel: &Kernel) -> FilterResult<Pix> {
    apply_kernel_3x3(pix, kernel, |sum| sum)
}

fn apply_kernel_3x3<F>(pix: &Pix, kernel: &Kernel, finish: F) -> FilterResult<Pix>
where
    F: Fn(f32) -> f32,
{
    if kernel.width() != 3 || kernel.height() != 3 {
        return Err(FilterError::InvalidKernel(format!(
            "expected 3x3 kernel, got {}x{}",
            kernel.width(),
            kernel.height()
        )));
    }
    if !pix.is_gray() {
        return Err(FilterError::UnsupportedFormat {
            expected: "1-channel",
            actual: pix.channels().count(),
        });
    }

    let w = pix.width() as usize;
    let h = pix.height();
    let mut out = pix.create_template().to_mut();
    if w < 3 || h < 3 {
        return Ok(out.into());
    }

    let weights = kernel.data();
    for y in 1..h - 1 {
        let rows = [pix.row_data(y - 1), pix.row_data(y), pix.row_data(y + 1)];
        let out_row = out.row_data_mut(y);

        for x in 1..w - 1 {
            // Accumulator starts fresh for every output sample
            let mut sum = 0.0f32;
            for (ky, row) in rows.iter().enumerate() {
                for kx in 0..3 {
                    sum += weights[ky * 3 + kx] * row[x + kx - 1] as f32;
                }
            }
            // Float-to-int `as` truncates toward zero and saturates
            out_row[x] = finish(sum) as u8;
        }
    }

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedseg_core::{Channels, PixMut, mask};

    fn single_dot(size: u32, at: u32) -> Pix {
        let mut pm = PixMut::new(size, size, Channels::Gray).unwrap();
        pm.set_gray(at, at, mask::FOREGROUND).unwrap();
        pm.into()
    }

    #[test]
    fn test_single_pixel_response() {
        let out = smooth_gaussian(&single_dot(5, 2)).unwrap();
        assert_eq!(out.get_gray(2, 2), Some(28));
        assert_eq!(out.get_gray(1, 2), Some(14));
        assert_eq!(out.get_gray(3, 2), Some(14));
        assert_eq!(out.get_gray(2, 1), Some(14));
        assert_eq!(out.get_gray(2, 3), Some(14));
        assert_eq!(out.get_gray(1, 1), Some(7));
        assert_eq!(out.get_gray(3, 3), Some(7));
        assert_eq!(out.get_gray(0, 0), Some(0));
    }

    #[test]
    fn test_full_white_interior() {
        let mut pm = PixMut::new(4, 4, Channels::Gray).unwrap();
        pm.data_mut().fill(255);
        let out = smooth_gaussian(&pm.into()).unwrap();
        // 255 / 9 * 4 = 113.33
        assert_eq!(out.get_gray(1, 1), Some(113));
        assert_eq!(out.get_gray(2, 2), Some(113));
        for i in 0..4 {
            assert_eq!(out.get_gray(i, 0), Some(0));
            assert_eq!(out.get_gray(i, 3), Some(0));
            assert_eq!(out.get_gray(0, i), Some(0));
            assert_eq!(out.get_gray(3, i), Some(0));
        }
    }

    #[test]
    fn test_sum_does_not_carry_between_pixels() {
        // A dot far from later samples must not brighten them
        let mut pm = PixMut::new(9, 3, Channels::Gray).unwrap();
        pm.set_gray(1, 1, 255).unwrap();
        let out = smooth_gaussian(&pm.into()).unwrap();
        assert_eq!(out.get_gray(1, 1), Some(28));
        assert_eq!(out.get_gray(2, 1), Some(14));
        assert_eq!(out.get_gray(3, 1), Some(0));
        assert_eq!(out.get_gray(7, 1), Some(0));
    }

    #[test]
    fn test_convolve_identity() {
        let mut weights = [0.0f32; 9];
        weights[4] = 1.0;
        let identity = Kernel::from_slice(3, 3, &weights).unwrap();
        let out = convolve_3x3(&single_dot(5, 2), &identity).unwrap();
        assert_eq!(out.get_gray(2, 2), Some(255));
        assert_eq!(out.count_foreground(), 1);
    }

    #[test]
    fn test_convolve_rejects_wrong_kernel_size() {
        let k = Kernel::from_slice(1, 1, &[1.0]).unwrap();
        assert!(matches!(
            convolve_3x3(&single_dot(5, 2), &k),
            Err(FilterError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_color_rejected() {
        let pix = Pix::new(5, 5, Channels::Rgb).unwrap();
        assert!(matches!(
            smooth_gaussian(&pix),
            Err(FilterError::UnsupportedFormat { actual: 3, .. })
        ));
    }
}
