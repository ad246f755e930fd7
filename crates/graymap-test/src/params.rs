//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use graymap_core::Image;
use std::fs;

/// Regression test parameters
///
/// Tracks the state of a regression test: its name, the index of the
/// current check, and every failure seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "convolve")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "convolve")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two images for exact equality
    ///
    /// Width, height, max value and every sample must match.
    pub fn compare_images(&mut self, img1: &Image, img2: &Image) -> bool {
        self.index += 1;

        if !img1.sizes_equal(img2) || img1.max_value() != img2.max_value() {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - header mismatch \
                 ({}x{} max {} vs {}x{} max {})",
                self.test_name,
                self.index,
                img1.width(),
                img1.height(),
                img1.max_value(),
                img2.width(),
                img2.height(),
                img2.max_value()
            );
            self.record_failure(msg);
            return false;
        }

        for y in 0..img1.height() {
            for x in 0..img1.width() {
                if img1.get_pixel_unchecked(x, y) != img2.get_pixel_unchecked(x, y) {
                    let msg = format!(
                        "Failure in {}_reg: image comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    );
                    self.record_failure(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Compare two binary data arrays
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Write an image to the regout directory for visual inspection
    ///
    /// The file is named `<test>.<index>.pgm`.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn write_image(&mut self, img: &Image) -> TestResult<String> {
        self.index += 1;

        let dir = regout_dir();
        fs::create_dir_all(&dir)?;
        let path = format!("{}/{}.{:02}.pgm", dir, self.test_name, self.index);
        graymap_io::write_image(img, &path).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(path)
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
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
}
