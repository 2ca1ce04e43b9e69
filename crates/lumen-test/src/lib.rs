//! lumen-test - Regression test framework for lumen
//!
//! Provides the [`RegParams`] bookkeeping object used by every `*_reg.rs`
//! integration test, and the [`synth`] module of deterministic synthetic
//! rasters that stand in for decoded test images.
//!
//! # Usage
//!
//! ```ignore
//! use lumen_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("isodata");
//! let pix = synth::bimodal(32, 32, 50, 200).unwrap();
//! let (threshold, _) = lumen_threshold::isodata_threshold(&pix).unwrap();
//! rp.compare_values(125.0, threshold as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"
//! - `RUST_LOG`: filter for the `tracing` output of the crates under test

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
