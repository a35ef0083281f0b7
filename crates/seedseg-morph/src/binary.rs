//! Mask morphological operations
//!
//! Implements erosion, dilation, opening, and closing for 1-channel
//! {0, 255} masks with a fixed 3×3 square structuring element.
//!
//! Both primitives sum the nine samples of the 3×3 neighborhood and
//! threshold the sum. Only interior pixels are processed: the outermost
//! row and column on each side of the output stay BACKGROUND, so callers
//! must not rely on border values.

use crate::{MorphError, MorphResult};
use seedseg_core::{Pix, mask};

/// Number of samples in the 3×3 neighborhood.
pub const NEIGHBORHOOD_SIZE: u32 = 9;

const FG: u32 = mask::FOREGROUND as u32;

/// Erode a mask
///
/// An interior output pixel is FOREGROUND only when its whole 3×3
/// neighborhood is FOREGROUND (neighborhood sum at least `9 × 255`).
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedFormat`] for a non 1-channel input.
pub fn erode(pix: &Pix) -> MorphResult<Pix> {
    apply_3x3(pix, |sum| sum >= NEIGHBORHOOD_SIZE * FG)
}

/// Dilate a mask
///
/// An interior output pixel is FOREGROUND when any sample of its 3×3
/// neighborhood is FOREGROUND (neighborhood sum at least `255`).
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedFormat`] for a non 1-channel input.
pub fn dilate(pix: &Pix) -> MorphResult<Pix> {
    apply_3x3(pix, |sum| sum >= FG)
}

/// Open a mask
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground specks and smooths outward spurs.
pub fn open(pix: &Pix) -> MorphResult<Pix> {
    let eroded = erode(pix)?;
    dilate(&eroded)
}

/// Close a mask
///
/// Closing = Dilation followed by Erosion.
/// Fills small background gaps and pinholes inside the foreground.
pub fn close(pix: &Pix) -> MorphResult<Pix> {
    let dilated = dilate(pix)?;
    erode(&dilated)
}

pub(crate) fn check_gray(pix: &Pix) -> MorphResult<()> {
    if !pix.is_gray() {
        return Err(MorphError::UnsupportedFormat {
            expected: "1-channel mask",
            actual: pix.channels().count(),
        });
    }
    Ok(())
}

/// Threshold the 3×3 neighborhood sum of every interior pixel.
///
/// Allocates a fresh zero-filled output; the input is never modified.
fn apply_3x3<F>(pix: &Pix, keep: F) -> MorphResult<Pix>
where
    F: Fn(u32) -> bool,
{
    check_gray(pix)?;

    let w = pix.width() as usize;
    let h = pix.height();
    let mut out = pix.create_template().to_mut();

    // Images without an interior produce an all-background output
    if w < 3 || h < 3 {
        return Ok(out.into());
    }

    for y in 1..h - 1 {
        let above = pix.row_data(y - 1);
        let row = pix.row_data(y);
        let below = pix.row_data(y + 1);
        let out_row = out.row_data_mut(y);

        for x in 1..w - 1 {
            let sum: u32 = [above, row, below]
                .iter()
                .map(|r| r[x - 1] as u32 + r[x] as u32 + r[x + 1] as u32)
                .sum();
            out_row[x] = if keep(sum) {
                mask::FOREGROUND
            } else {
                mask::BACKGROUND
            };
        }
    }

    Ok(out.into())
}
