//! Seeded color flood fill
//!
//! Grows a region of similar color outward from a seed pixel using
//! 4-way connectivity, then cleans the raw fill up with one morphological
//! opening followed by one closing.
//!
//! # Addressing conventions
//!
//! Two long-standing conventions are preserved for compatibility with
//! masks produced by earlier tools:
//!
//! - **Swapped bounds.** The seed addresses storage column `x`, row `y`,
//!   but propagation bounds are swapped: a row step is bounded by the
//!   image *width* and a column step by the image *height*, both clipped
//!   to storage. On non-square images the fill therefore stops short of
//!   the far edge along the longer axis.
//! - **Lower-edge exclusion.** A step is taken only when the coordinate
//!   it changes satisfies `0 < c < bound`. No step ever moves onto row 0
//!   or column 0, so those lines are filled only when the seed itself
//!   lies on them.

use crate::{RegionError, RegionResult};
use log::debug;
use seedseg_core::{Channels, Pix, PixMut, mask};
use seedseg_morph::{close, open};

/// Default per-channel color tolerance.
pub const DEFAULT_TOLERANCE: u32 = 5;

/// Options for [`grow_region`]
#[derive(Debug, Clone)]
pub struct GrowOptions {
    /// Per-channel tolerance; a pixel joins when every channel differs
    /// from the seed color by strictly less than this
    pub tolerance: u32,
    /// Apply opening then closing to the raw fill
    pub refine: bool,
}

impl Default for GrowOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            refine: true,
        }
    }
}

impl GrowOptions {
    /// Create options with the given tolerance and refinement enabled
    pub fn new(tolerance: u32) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Set the color tolerance
    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable the opening/closing refinement
    pub fn with_refine(mut self, refine: bool) -> Self {
        self.refine = refine;
        self
    }
}

/// Grow a region mask from a seed in a color image
///
/// Runs [`flood_fill`] and, when `options.refine` is set, passes the raw
/// mask through [`refine_region`].
///
/// # Arguments
///
/// * `pix` - 3-channel color image
/// * `seed_x` - Seed column
/// * `seed_y` - Seed row
/// * `options` - Tolerance and refinement settings
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedFormat`] for non-color input and
/// [`RegionError::SeedOutOfRange`] for a seed outside the image.
pub fn grow_region(pix: &Pix, seed_x: u32, seed_y: u32, options: &GrowOptions) -> RegionResult<Pix> {
    let raw = flood_fill(pix, seed_x, seed_y, options.tolerance)?;
    if !options.refine {
        return Ok(raw);
    }
    refine_region(&raw)
}

/// Clean up a raw fill mask: opening, then closing.
pub fn refine_region(mask: &Pix) -> RegionResult<Pix> {
    let opened = open(mask)?;
    let refined = close(&opened)?;
    debug!(
        "refine: {} -> {} foreground pixels",
        mask.count_foreground(),
        refined.count_foreground()
    );
    Ok(refined)
}

/// Flood fill from a seed, returning the unrefined mask
///
/// The output is a 1-channel mask of the input's size with FOREGROUND
/// at every pixel reached. A tolerance of 0 accepts nothing, so the
/// mask comes back empty.
///
/// # Errors
///
/// See [`grow_region`].
pub fn flood_fill(pix: &Pix, seed_x: u32, seed_y: u32, tolerance: u32) -> RegionResult<Pix> {
    if pix.channels().count() != 3 {
        return Err(RegionError::UnsupportedFormat {
            expected: "3-channel color",
            actual: pix.channels().count(),
        });
    }

    let width = pix.width();
    let height = pix.height();
    let out_of_range = || RegionError::SeedOutOfRange {
        x: seed_x,
        y: seed_y,
        width,
        height,
    };
    if seed_x >= width || seed_y >= height {
        return Err(out_of_range());
    }

    let (seed_row, seed_col) = (seed_y, seed_x);
    let seed_color = pix.get_color(seed_col, seed_row).ok_or_else(out_of_range)?;

    // Swapped propagation bounds (rows by width, columns by height),
    // clipped to storage
    let row_limit = width.min(height);
    let col_limit = height.min(width);

    let mut out = PixMut::new(width, height, Channels::Gray)?;
    let mut stack: Vec<(u32, u32)> = vec![(seed_row, seed_col)];
    let mut marked = 0usize;

    while let Some((row, col)) = stack.pop() {
        if out.get_gray(col, row) == Some(mask::FOREGROUND) {
            continue;
        }
        let Some(color) = pix.get_color(col, row) else {
            continue;
        };
        if !color.within_tolerance(&seed_color, tolerance) {
            continue;
        }

        out.set_gray_unchecked(col, row, mask::FOREGROUND);
        marked += 1;

        // Lower-edge exclusion: coordinates must stay strictly above 0
        if row + 1 < row_limit {
            stack.push((row + 1, col));
        }
        if row > 1 {
            stack.push((row - 1, col));
        }
        if col + 1 < col_limit {
            stack.push((row, col + 1));
        }
        if col > 1 {
            stack.push((row, col - 1));
        }
    }

    debug!(
        "flood fill from ({}, {}) tolerance {}: {} pixels",
        seed_x, seed_y, tolerance, marked
    );
    Ok(out.into())
}
