//! Perimeter extraction regression test
//!
//! Run with:
//! ```
//! cargo test -p seedseg-morph --test perimeter_reg
//! ```

use seedseg_core::{ImageFormat, mask};
use seedseg_io::{read_image, write_image};
use seedseg_morph::{erode, extract_perimeter};
use seedseg_test::{RegParams, is_subset, mask_from_fn, mask_rect, scratch_path};

#[test]
fn perimeter_reg() {
    let mut rp = RegParams::new("perimeter");

    // ------------------------------------------------------------------
    // Square region: ring of width one
    // ------------------------------------------------------------------
    let region = mask_rect(10, 10, 2, 2, 8, 8).unwrap();
    let perimeter = extract_perimeter(&region).unwrap();
    rp.compare_values(36.0, region.count_foreground() as f64, 0.0);
    rp.compare_values(20.0, perimeter.count_foreground() as f64, 0.0);
    rp.compare_values(1.0, if is_subset(&perimeter, &region) { 1.0 } else { 0.0 }, 0.0);
    // Ring interior is the erosion
    rp.compare_values(
        16.0,
        erode(&region).unwrap().count_foreground() as f64,
        0.0,
    );

    // ------------------------------------------------------------------
    // Disk region: perimeter plus erosion partition the region
    // ------------------------------------------------------------------
    let disk = mask_from_fn(31, 31, |x, y| {
        let dx = x as i32 - 15;
        let dy = y as i32 - 15;
        dx * dx + dy * dy <= 100
    })
    .unwrap();
    let disk_perimeter = extract_perimeter(&disk).unwrap();
    let disk_inner = erode(&disk).unwrap();
    rp.compare_values(
        disk.count_foreground() as f64,
        (disk_perimeter.count_foreground() + disk_inner.count_foreground()) as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        if is_subset(&disk_perimeter, &disk) { 1.0 } else { 0.0 },
        0.0,
    );
    rp.compare_values(
        mask::BACKGROUND as f64,
        disk_perimeter.get_gray(15, 15).unwrap() as f64,
        0.0,
    );

    // ------------------------------------------------------------------
    // The perimeter survives a trip through the mask file format
    // ------------------------------------------------------------------
    let path = scratch_path("perimeter.pgm");
    write_image(&disk_perimeter, &path, ImageFormat::Pnm).unwrap();
    let back = read_image(&path).unwrap();
    rp.compare_pix(&disk_perimeter, &back);
    let _ = std::fs::remove_file(&path);

    if rp.display() {
        rp.write_pix(&disk_perimeter, ImageFormat::Png).unwrap();
    }

    assert!(rp.cleanup(), "perimeter regression test failed");
}

#[test]
fn perimeter_touching_border() {
    // A region reaching the border keeps its border pixels in the perimeter
    let region = mask_from_fn(6, 6, |_, _| true).unwrap();
    let perimeter = extract_perimeter(&region).unwrap();
    assert_eq!(perimeter.count_foreground(), 20);
    assert_eq!(perimeter.get_gray(0, 0), Some(mask::FOREGROUND));
    assert_eq!(perimeter.get_gray(2, 2), Some(mask::BACKGROUND));
}
