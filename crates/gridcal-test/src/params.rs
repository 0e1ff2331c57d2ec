//! Regression test parameters and operations

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Record actual values without failing the run
    Display,
    /// Compare against expected values (default)
    #[default]
    Compare,
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
/// Tracks the state of one regression test: its name, the index of the
/// current comparison, and the failures recorded so far. Tests make a
/// series of [`compare_values`](RegParams::compare_values) calls and
/// finish with [`cleanup`](RegParams::cleanup), which reports and
/// returns the overall outcome.
pub struct RegParams {
    /// Name of the test (e.g., "engine")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
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
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "engine")
    pub fn new(test_name: &str) -> Self {
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

    /// Get the current comparison index
    pub fn index(&self) -> usize {
        self.index
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
    /// `true` if the values match within `delta`.
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
            eprintln!("{}", msg);
            self.failures.push(msg);
            if self.mode == RegTestMode::Compare {
                self.success = false;
            }
            return false;
        }
        true
    }

    /// Compare two integer counts exactly
    pub fn compare_counts(&mut self, expected: u64, actual: u64) -> bool {
        self.compare_values(expected as f64, actual as f64, 0.0)
    }

    /// Check that a condition holds
    ///
    /// # Arguments
    ///
    /// * `condition` - The property under test
    /// * `label` - Short description used in the failure report
    pub fn check(&mut self, condition: bool, label: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check '{}' failed at index {}",
                self.test_name, label, self.index
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            if self.mode == RegTestMode::Compare {
                self.success = false;
            }
        }
        condition
    }

    /// Current success status
    pub fn success(&self) -> bool {
        self.success
    }

    /// Report the outcome and return whether the test passed
    ///
    /// Prints a summary line and every recorded failure, then returns
    /// the overall status; tests typically end with
    /// `assert!(rp.cleanup())`.
    pub fn cleanup(&self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg ({} comparisons)", self.test_name, self.index);
        } else {
            eprintln!(
                "FAILURE: {}_reg ({} of {} comparisons failed)",
                self.test_name,
                self.failures.len(),
                self.index
            );
        }
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("selftest");
        assert!(rp.compare_values(1.0, 1.0, 0.0));
        assert!(rp.compare_values(1.0, 1.05, 0.1));
        assert!(rp.success());
        assert!(rp.cleanup());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_outside_delta_fails() {
        let mut rp = RegParams::new("selftest");
        assert!(!rp.compare_values(1.0, 2.0, 0.5));
        assert!(!rp.success());
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_counts() {
        let mut rp = RegParams::new("selftest");
        assert!(rp.compare_counts(100, 100));
        assert!(!rp.compare_counts(100, 99));
    }

    #[test]
    fn test_check_records_label() {
        let mut rp = RegParams::new("selftest");
        assert!(rp.check(true, "holds"));
        assert!(!rp.check(false, "does not hold"));
        assert!(!rp.success());
    }
}
