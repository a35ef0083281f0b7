//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use seedseg_core::{ImageFormat, Pix};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed values only (default)
    #[default]
    Compare,
    /// Also write intermediate images to the regout directory
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: its name, the index of the
/// current check, the mode, and every recorded failure.
pub struct RegParams {
    /// Name of the test (e.g., "floodfill")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two images for exact equality of geometry and samples
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - geometry mismatch \
                 ({}x{}x{} vs {}x{}x{})",
                self.test_name,
                self.index,
                pix1.width(),
                pix1.height(),
                pix1.channels().count(),
                pix2.width(),
                pix2.height(),
                pix2.channels().count()
            ));
            return false;
        }

        let stride = pix1.stride();
        if let Some(pos) = pix1
            .data()
            .iter()
            .zip(pix2.data())
            .position(|(a, b)| a != b)
        {
            let channels = pix1.channels().count() as usize;
            let x = (pos % stride) / channels;
            let y = pos / stride;
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - sample mismatch at ({}, {})",
                self.test_name, self.index, x, y
            ));
            return false;
        }

        true
    }

    /// Write an image to the regout directory in display mode.
    ///
    /// Does nothing in compare mode. The index advances either way so
    /// file names stay stable between modes.
    pub fn write_pix(&mut self, pix: &Pix, format: ImageFormat) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );
        seedseg_io::write_image(pix, &local_path, format).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("Wrote: {}", local_path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedseg_core::Channels;

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_pix_mismatch_location() {
        let a = Pix::from_raw(3, 2, Channels::Gray, vec![0, 0, 0, 0, 0, 0]).unwrap();
        let b = Pix::from_raw(3, 2, Channels::Gray, vec![0, 0, 0, 0, 255, 0]).unwrap();
        let mut rp = RegParams::new("test");
        assert!(rp.compare_pix(&a, &a.clone()));
        assert!(!rp.compare_pix(&a, &b));
        assert!(rp.failures()[0].contains("(1, 1)"));
    }
}
