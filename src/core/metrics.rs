//! Per-test and per-file metrics shared by every extractor.

use serde::{Deserialize, Serialize};

/// Raw metrics for one discovered test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMetrics {
    /// Declared test name (function name or quoted title).
    pub name: String,
    /// Number of assertions found in the test.
    pub assertions: usize,
    /// Number of mock/stub factory calls.
    pub mocks: usize,
    /// Line span of the test.
    pub lines: usize,
    /// Detected issues, in detection order.
    pub issues: Vec<String>,
}

/// Metrics for a whole test file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// File path as reported.
    pub path: String,
    /// Tests in source order.
    pub tests: Vec<TestMetrics>,
    /// Sum of `assertions` over `tests`.
    pub total_assertions: usize,
    /// Sum of `mocks` over `tests`.
    pub total_mocks: usize,
}

impl FileMetrics {
    /// Aggregate per-test metrics into file totals.
    pub fn new(path: impl Into<String>, tests: Vec<TestMetrics>) -> Self {
        let total_assertions = tests.iter().map(|t| t.assertions).sum();
        let total_mocks = tests.iter().map(|t| t.mocks).sum();
        Self {
            path: path.into(),
            tests,
            total_assertions,
            total_mocks,
        }
    }

    /// A file with no tests, used when the source cannot be parsed.
    pub fn empty(path: impl Into<String>) -> Self {
        Self::new(path, Vec::new())
    }

    /// Number of tests discovered.
    pub fn tests_count(&self) -> usize {
        self.tests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(name: &str, assertions: usize, mocks: usize) -> TestMetrics {
        TestMetrics {
            name: name.to_string(),
            assertions,
            mocks,
            lines: 4,
            issues: Vec::new(),
        }
    }

    #[test]
    fn test_totals_are_sums() {
        let file = FileMetrics::new(
            "tests/test_cart.py",
            vec![
                metrics("test_add_item", 3, 0),
                metrics("test_remove_item", 2, 1),
                metrics("test_checkout", 0, 4),
            ],
        );
        assert_eq!(file.total_assertions, 5);
        assert_eq!(file.total_mocks, 5);
        assert_eq!(file.tests_count(), 3);
    }

    #[test]
    fn test_empty_has_zero_totals() {
        let file = FileMetrics::empty("broken.py");
        assert_eq!(file.path, "broken.py");
        assert!(file.tests.is_empty());
        assert_eq!(file.total_assertions, 0);
        assert_eq!(file.total_mocks, 0);
    }
}
