//! Coverage status classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-flow test counters; only ever incremented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCounts {
    /// Tests that referenced the flow
    pub total: u32,
    /// Passed tests
    pub passed: u32,
    /// Failed or timed-out tests
    pub failed: u32,
    /// Skipped tests
    pub skipped: u32,
}

impl TestCounts {
    /// Whether `total` equals the sum of the outcome buckets
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.total == self.passed + self.failed + self.skipped
    }

    /// Pass percentage rounded to a whole number, 0 when empty
    #[must_use]
    pub fn pass_percent(&self) -> u32 {
        percent(self.passed, self.total)
    }
}

/// Run-level verdict for a flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageStatus {
    /// Every test passed, none skipped
    Covered,
    /// No failures but at least one skip
    Partial,
    /// At least one failure
    Failing,
    /// No test exercised the flow
    #[default]
    Missing,
}

impl CoverageStatus {
    /// All statuses in report order
    pub const ALL: [Self; 4] = [Self::Covered, Self::Partial, Self::Failing, Self::Missing];
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Covered => write!(f, "covered"),
            Self::Partial => write!(f, "partial"),
            Self::Failing => write!(f, "failing"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// Classify a flow from its counters. First match wins:
/// no tests, any failure, all passed, everything else.
#[must_use]
pub const fn classify(tests: &TestCounts) -> CoverageStatus {
    if tests.total == 0 {
        CoverageStatus::Missing
    } else if tests.failed > 0 {
        CoverageStatus::Failing
    } else if tests.passed > 0 && tests.skipped == 0 {
        CoverageStatus::Covered
    } else {
        CoverageStatus::Partial
    }
}

/// `part / whole` as a whole-number percentage, half rounded up
#[must_use]
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) * 100.0 / f64::from(whole)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(passed: u32, failed: u32, skipped: u32) -> TestCounts {
        TestCounts {
            total: passed + failed + skipped,
            passed,
            failed,
            skipped,
        }
    }

    mod classify_tests {
        use super::*;

        #[test]
        fn test_empty_is_missing() {
            assert_eq!(classify(&TestCounts::default()), CoverageStatus::Missing);
        }

        #[test]
        fn test_any_failure_is_failing() {
            assert_eq!(classify(&counts(9, 1, 0)), CoverageStatus::Failing);
            assert_eq!(classify(&counts(0, 1, 3)), CoverageStatus::Failing);
        }

        #[test]
        fn test_all_passed_is_covered() {
            assert_eq!(classify(&counts(3, 0, 0)), CoverageStatus::Covered);
        }

        #[test]
        fn test_single_skip_is_partial() {
            assert_eq!(classify(&counts(9, 0, 1)), CoverageStatus::Partial);
        }

        #[test]
        fn test_skip_only_is_partial() {
            assert_eq!(classify(&counts(0, 0, 2)), CoverageStatus::Partial);
        }

        #[test]
        fn test_classify_is_idempotent() {
            let c = counts(2, 0, 1);
            assert_eq!(classify(&c), classify(&c));
        }
    }

    mod counts_tests {
        use super::*;

        #[test]
        fn test_consistency() {
            assert!(counts(1, 2, 3).is_consistent());
            let broken = TestCounts {
                total: 5,
                passed: 1,
                failed: 0,
                skipped: 0,
            };
            assert!(!broken.is_consistent());
        }

        #[test]
        fn test_pass_percent() {
            assert_eq!(counts(1, 0, 2).pass_percent(), 33);
            assert_eq!(counts(2, 0, 1).pass_percent(), 67);
            assert_eq!(TestCounts::default().pass_percent(), 0);
        }
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&CoverageStatus::Failing).unwrap(),
            "\"failing\""
        );
        assert_eq!(CoverageStatus::default(), CoverageStatus::Missing);
        assert_eq!(CoverageStatus::Partial.to_string(), "partial");
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(3, 3), 100);
    }
}
