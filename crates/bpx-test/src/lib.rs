//! bpx-test - Regression test harness for bpx
//!
//! Regression tests drive a [`RegParams`] through a numbered sequence of
//! checks. Each check either compares values directly or writes an output
//! file and compares it with a golden copy. Three modes are supported:
//!
//! - **Generate**: Write golden files from the current outputs
//! - **Compare**: Compare outputs with golden files (default)
//! - **Display**: Run the checks that need no golden files
//!
//! # Usage
//!
//! ```ignore
//! use bpx_test::RegParams;
//!
//! let mut rp = RegParams::new("blend");
//! rp.compare_values(255.0, color.r as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"
//! - `RUST_LOG`: Log filter for library output during tests

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Install the test logger once per process.
///
/// Later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // bpx-test is at crates/bpx-test
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
