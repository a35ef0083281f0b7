//! seedseg-test - Regression test framework for seedseg
//!
//! Provides [`RegParams`] for tracking the checks of a regression test,
//! and builders for the small synthetic images the tests run on.
//!
//! # Usage
//!
//! ```ignore
//! use seedseg_test::{RegParams, solid_rgb};
//!
//! let mut rp = RegParams::new("floodfill");
//! rp.compare_values(36.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to write intermediate images to
//!   `tests/regout`

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use seedseg_core::{Channels, ColorSample, Pix, PixMut, mask};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // seedseg-test is at crates/seedseg-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Path for a scratch file unique to this process.
pub fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("seedseg-{}-{}", std::process::id(), name))
}

/// Build a color image filled with one color.
pub fn solid_rgb(width: u32, height: u32, color: ColorSample) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, Channels::Rgb)?;
    pm.fill_color(color)?;
    Ok(pm.into())
}

/// Build a color image whose pixel at storage position (x, y) is `f(x, y)`.
pub fn rgb_from_fn<F>(width: u32, height: u32, f: F) -> TestResult<Pix>
where
    F: Fn(u32, u32) -> ColorSample,
{
    let mut pm = PixMut::new(width, height, Channels::Rgb)?;
    for y in 0..height {
        for x in 0..width {
            pm.set_color(x, y, f(x, y))?;
        }
    }
    Ok(pm.into())
}

/// Build a mask whose pixel at (x, y) is foreground when `f(x, y)` holds.
pub fn mask_from_fn<F>(width: u32, height: u32, f: F) -> TestResult<Pix>
where
    F: Fn(u32, u32) -> bool,
{
    let mut pm = PixMut::new(width, height, Channels::Gray)?;
    for y in 0..height {
        for x in 0..width {
            if f(x, y) {
                pm.set_gray(x, y, mask::FOREGROUND)?;
            }
        }
    }
    Ok(pm.into())
}

/// Build a mask with foreground pixels in [x0,x1) × [y0,y1).
pub fn mask_rect(width: u32, height: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> TestResult<Pix> {
    mask_from_fn(width, height, |x, y| x >= x0 && x < x1 && y >= y0 && y < y1)
}

/// Check that every foreground pixel of `inner` is also foreground in `outer`.
pub fn is_subset(inner: &Pix, outer: &Pix) -> bool {
    inner
        .data()
        .iter()
        .zip(outer.data())
        .all(|(&i, &o)| !mask::is_foreground(i) || mask::is_foreground(o))
}
