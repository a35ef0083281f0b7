//! Gaussian smoothing regression test
//!
//! Smooths the perimeter of a square region and checks the response at
//! corners, edges, inside and outside the ring.
//!
//! Run with:
//! ```
//! cargo test -p seedseg-filter --test smooth_reg
//! ```

use seedseg_core::ImageFormat;
use seedseg_filter::smooth_gaussian;
use seedseg_morph::extract_perimeter;
use seedseg_test::{RegParams, mask_rect};

#[test]
fn smooth_reg() {
    let mut rp = RegParams::new("smooth");

    let region = mask_rect(10, 10, 2, 2, 8, 8).unwrap();
    let perimeter = extract_perimeter(&region).unwrap();
    let smoothed = smooth_gaussian(&perimeter).unwrap();

    let at = |x: u32, y: u32| smoothed.get_gray(x, y).unwrap() as f64;

    // Ring corner and ring edge: half the kernel weight on foreground
    rp.compare_values(56.0, at(2, 2), 0.0);
    rp.compare_values(56.0, at(4, 2), 0.0);
    rp.compare_values(56.0, at(2, 5), 0.0);
    // Just inside the ring corner
    rp.compare_values(49.0, at(3, 3), 0.0);
    // Center of the ring is untouched
    rp.compare_values(0.0, at(4, 4), 0.0);
    rp.compare_values(0.0, at(5, 5), 0.0);
    // Outside: diagonal and edge contact
    rp.compare_values(7.0, at(1, 1), 0.0);
    rp.compare_values(28.0, at(1, 4), 0.0);
    // Border frame stays zero
    rp.compare_values(0.0, at(0, 4), 0.0);
    rp.compare_values(0.0, at(9, 9), 0.0);

    // Nothing reaches full intensity after smoothing
    rp.compare_values(0.0, smoothed.count_foreground() as f64, 0.0);

    // Smoothing again keeps darkening
    let twice = smooth_gaussian(&smoothed).unwrap();
    rp.compare_values(
        1.0,
        if twice.get_gray(2, 2).unwrap() < smoothed.get_gray(2, 2).unwrap() {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    if rp.display() {
        rp.write_pix(&smoothed, ImageFormat::Png).unwrap();
        rp.write_pix(&twice, ImageFormat::Png).unwrap();
    }

    assert!(rp.cleanup(), "smooth regression test failed");
}
