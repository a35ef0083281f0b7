//! Region perimeter extraction

use crate::binary::{check_gray, erode};
use crate::MorphResult;
use log::debug;
use seedseg_core::Pix;

/// Extract the inner boundary of a region mask.
///
/// Computed as |region - erode(region)|: FOREGROUND exactly where the
/// region is FOREGROUND but its 3×3 erosion is not. Because erosion never
/// grows a mask, the result is always a subset of `region`.
///
/// # Errors
///
/// Returns [`crate::MorphError::UnsupportedFormat`] for a non 1-channel
/// input.
pub fn extract_perimeter(region: &Pix) -> MorphResult<Pix> {
    check_gray(region)?;

    let eroded = erode(region)?;
    let perimeter = region.arith_abs_diff(&eroded)?;

    debug!(
        "perimeter: {} of {} region pixels",
        perimeter.count_foreground(),
        region.count_foreground()
    );
    Ok(perimeter)
}
