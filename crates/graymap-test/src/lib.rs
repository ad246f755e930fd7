//! graymap-test - Regression test framework for the graymap crates
//!
//! Provides a small regression harness and synthetic test images:
//!
//! - [`RegParams`] numbers each check, records failures and reports
//!   them all at the end instead of stopping at the first one
//! - [`synth`] builds deterministic images so tests need no data files
//!
//! # Usage
//!
//! ```ignore
//! use graymap_test::RegParams;
//!
//! let mut rp = RegParams::new("convolve");
//! rp.compare_values(4.0, width as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::RegParams;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // graymap-test is at crates/graymap-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
