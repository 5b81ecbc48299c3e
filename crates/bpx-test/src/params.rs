//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, init_logging, regout_dir};
use bpx_core::Image;
use bpx_io::{ImageFormat, ReadOptions, WriteOptions};
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
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
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test state
///
/// Tracks the test name, the index of the current check, the mode and
/// every failure seen so far. Failures are collected rather than raised so
/// a single run reports all of them; [`RegParams::cleanup`] returns the
/// overall verdict.
pub struct RegParams {
    /// Name of the test (e.g., "blend")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create regression test state for `test_name`.
    ///
    /// The mode comes from `REGTEST_MODE`. The golden and output
    /// directories are created if missing and the test logger is
    /// installed.
    pub fn new(test_name: &str) -> Self {
        init_logging();
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

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

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
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

    /// Compare two images pixel by pixel.
    ///
    /// Images match when they have the same dimensions and decode to the
    /// same colors everywhere; the storage formats may differ.
    pub fn compare_images(&mut self, img1: &Image<'_>, img2: &Image<'_>) -> bool {
        self.index += 1;

        if img1.dimensions() != img2.dimensions() {
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch \
                 ({:?} vs {:?})",
                self.test_name,
                self.index,
                img1.dimensions(),
                img2.dimensions()
            ));
            return false;
        }

        if let Some(offset) = first_difference(img1, img2) {
            let width = img1.width() as usize;
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - pixel mismatch at ({}, {}): \
                 {:?} vs {:?}",
                self.test_name,
                self.index,
                offset % width,
                offset / width,
                img1.get_at(offset),
                img2.get_at(offset)
            ));
            return false;
        }

        true
    }

    /// Compare two byte strings for equality
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            self.fail(format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            ));
            false
        } else {
            true
        }
    }

    /// Write an image and check it against its golden file.
    ///
    /// The output goes to `regout/<name>.<index>.<ext>`.
    pub fn write_image_and_check(&mut self, image: &Image<'_>, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let local_path = self.local_path(format.extension());
        bpx_io::write_image(image, &local_path, format, WriteOptions::default()).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        self.check_file(&local_path)
    }

    /// Write raw data and check it against its golden file.
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.index += 1;

        let local_path = self.local_path(ext);
        fs::write(&local_path, data)?;
        self.check_file(&local_path)
    }

    fn local_path(&self, ext: &str) -> String {
        format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        )
    }

    /// Check a file against its golden counterpart.
    ///
    /// Generate mode copies the file to the golden directory. Compare mode
    /// compares bytes, falling back to a decoded pixel comparison for
    /// images; a missing golden file is seeded from the output. Display
    /// mode does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    log::warn!("golden file {} missing; seeding from {}", golden_path, local_path);
                    fs::copy(local_path, &golden_path)?;
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !same_image_files(local_path, &golden_path) {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if every check passed.
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

fn first_difference(img1: &Image<'_>, img2: &Image<'_>) -> Option<usize> {
    (0..img1.size()).find(|&i| img1.get_at(i) != img2.get_at(i))
}

/// Decode two image files and compare their pixels.
fn same_image_files(path1: &str, path2: &str) -> bool {
    let (Ok(img1), Ok(img2)) = (
        bpx_io::read_image(path1, ReadOptions::default()),
        bpx_io::read_image(path2, ReadOptions::default()),
    ) else {
        return false;
    };
    img1.dimensions() == img2.dimensions() && first_difference(&img1, &img2).is_none()
}
