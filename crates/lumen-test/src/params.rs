//! Regression test parameters and operations

use lumen_core::{FPix, Pix};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Record every mismatch as a failure (default)
    #[default]
    Compare,
    /// Report mismatches without failing, for inspecting new behaviour
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
/// Tracks the state of a regression test: the test name, the index of the
/// current check, the mode, and the failures recorded so far.
pub struct RegParams {
    /// Name of the test (e.g., "correlate")
    pub test_name: String,
    /// Current test index (incremented before each check)
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
    /// The mode is taken from `REGTEST_MODE`; a `tracing` subscriber is
    /// installed so library logs show up in test output.
    pub fn new(test_name: &str) -> Self {
        crate::init_logging();
        let mode = RegTestMode::from_env();

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

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        if self.mode == RegTestMode::Compare {
            self.failures.push(msg);
            self.success = false;
        }
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never compares within delta
        if diff.is_nan() || diff > delta {
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

    /// Check a boolean condition, recording `what` on failure
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.record_failure(msg);
        }
        condition
    }

    /// Compare two Pix images for exact equality
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            let msg = format!(
                "Failure in {}_reg: pix comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            self.record_failure(msg);
            return false;
        }

        for y in 0..pix1.height() {
            for x in 0..pix1.width() {
                let p1 = pix1.get_pixel_unchecked(x, y);
                let p2 = pix2.get_pixel_unchecked(x, y);
                if p1 != p2 {
                    let msg = format!(
                        "Failure in {}_reg: pix comparison for index {} - pixel mismatch at ({}, {}): {} vs {}",
                        self.test_name, self.index, x, y, p1, p2
                    );
                    self.record_failure(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Compare two FPix images element-wise within `delta`
    pub fn compare_fpix(&mut self, fpix1: &FPix, fpix2: &FPix, delta: f32) -> bool {
        self.index += 1;

        if fpix1.dimensions() != fpix2.dimensions() {
            let msg = format!(
                "Failure in {}_reg: fpix comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            self.record_failure(msg);
            return false;
        }

        for y in 0..fpix1.height() {
            for x in 0..fpix1.width() {
                let v1 = fpix1.get_pixel_unchecked(x, y);
                let v2 = fpix2.get_pixel_unchecked(x, y);
                let diff = (v1 - v2).abs();
                if diff.is_nan() || diff > delta {
                    let msg = format!(
                        "Failure in {}_reg: fpix comparison for index {} - value mismatch at ({}, {}): {} vs {}",
                        self.test_name, self.index, x, y, v1, v2
                    );
                    self.record_failure(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Finish the test and report
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

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_mode(name: &str) -> RegParams {
        let mut rp = RegParams::new(name);
        rp.mode = RegTestMode::Compare;
        rp
    }

    #[test]
    fn test_mode_from_env() {
        let mode = RegTestMode::from_env();
        assert!(matches!(mode, RegTestMode::Compare | RegTestMode::Display));
    }

    #[test]
    fn test_compare_values() {
        let mut rp = compare_mode("selftest_values");
        assert!(rp.compare_values(1.0, 1.05, 0.1));
        assert!(rp.is_success());
        assert!(!rp.compare_values(1.0, 2.0, 0.1));
        assert!(!rp.compare_values(1.0, f64::NAN, 0.1));
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 2);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_pix() {
        let mut rp = compare_mode("selftest_pix");
        let a = Pix::new_with_value(3, 3, 4).unwrap();
        let b = a.deep_clone();
        assert!(rp.compare_pix(&a, &b));

        let mut c = a.to_mut();
        c.set_pixel(1, 1, 5).unwrap();
        assert!(!rp.compare_pix(&a, &c.into()));
        assert!(!rp.compare_pix(&a, &Pix::new(3, 4).unwrap()));
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_fpix() {
        let mut rp = compare_mode("selftest_fpix");
        let a = FPix::new_with_value(2, 2, 1.0).unwrap();
        let b = FPix::new_with_value(2, 2, 1.0005).unwrap();
        assert!(rp.compare_fpix(&a, &b, 1e-3));
        assert!(!rp.compare_fpix(&a, &b, 1e-5));
    }

    #[test]
    fn test_display_mode_does_not_fail() {
        let mut rp = RegParams::new("selftest_display");
        rp.mode = RegTestMode::Display;
        assert!(!rp.check(false, "expected to be reported only"));
        assert!(rp.cleanup());
    }
}
