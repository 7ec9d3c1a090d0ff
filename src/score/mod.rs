//! File quality score.
//!
//! Every file starts at 50 and moves with its assertion density, mock
//! density, issue count and test count:
//!
//! | term        | effect                                   |
//! |-------------|------------------------------------------|
//! | assertions  | `+min(avg_assertions * 10, 30)`          |
//! | mocks       | `-(mock_ratio - 2) * 5` when ratio > 2   |
//! | issues      | `-5` per flattened issue                 |
//! | test count  | `+5` with three or more tests            |
//!
//! The sum is truncated toward zero and clamped to `0..=100`.

use serde::{Deserialize, Serialize};

use crate::core::{FileMetrics, TestMetrics};

/// Scores at or above this are reported as passing.
pub const PASSING_SCORE: u32 = 70;

/// Issue reported for a file without tests.
pub const NO_TESTS_ISSUE: &str = "No tests found";

const BASE_SCORE: f64 = 50.0;
const ASSERTION_WEIGHT: f64 = 10.0;
const MAX_ASSERTION_BONUS: f64 = 30.0;
const MOCK_RATIO_ALLOWANCE: f64 = 2.0;
const MOCK_PENALTY: f64 = 5.0;
const ISSUE_PENALTY: f64 = 5.0;
const TEST_COUNT_FOR_BONUS: usize = 3;
const TEST_COUNT_BONUS: f64 = 5.0;

/// Final score for one test file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScore {
    /// File path.
    pub path: String,
    /// Score in `0..=100`.
    pub score: u32,
    /// Number of tests in the file.
    pub tests_count: usize,
    /// Assertions per test, one decimal.
    pub avg_assertions: f64,
    /// Mocks per test, one decimal.
    pub mock_ratio: f64,
    /// `"<test name>: <issue>"` entries in test order.
    pub issues: Vec<String>,
}

impl TestScore {
    /// Whether the score meets [`PASSING_SCORE`].
    pub fn is_passing(&self) -> bool {
        self.score >= PASSING_SCORE
    }
}

/// Score a file from its tests and totals.
pub fn score_file(
    path: impl Into<String>,
    tests: &[TestMetrics],
    total_assertions: usize,
    total_mocks: usize,
) -> TestScore {
    let path = path.into();
    if tests.is_empty() {
        return TestScore {
            path,
            score: 0,
            tests_count: 0,
            avg_assertions: 0.0,
            mock_ratio: 0.0,
            issues: vec![NO_TESTS_ISSUE.to_string()],
        };
    }

    let tests_count = tests.len();
    let avg_assertions = total_assertions as f64 / tests_count as f64;
    let mock_ratio = total_mocks as f64 / tests_count as f64;

    let issues: Vec<String> = tests
        .iter()
        .flat_map(|test| {
            test.issues
                .iter()
                .map(move |issue| format!("{}: {}", test.name, issue))
        })
        .collect();

    let mut score = BASE_SCORE;
    score += (avg_assertions * ASSERTION_WEIGHT).min(MAX_ASSERTION_BONUS);
    if mock_ratio > MOCK_RATIO_ALLOWANCE {
        score -= (mock_ratio - MOCK_RATIO_ALLOWANCE) * MOCK_PENALTY;
    }
    score -= issues.len() as f64 * ISSUE_PENALTY;
    if tests_count >= TEST_COUNT_FOR_BONUS {
        score += TEST_COUNT_BONUS;
    }

    TestScore {
        path,
        score: clamp_score(score),
        tests_count,
        avg_assertions: round_one_decimal(avg_assertions),
        mock_ratio: round_one_decimal(mock_ratio),
        issues,
    }
}

/// Score extracted file metrics.
pub fn score_metrics(metrics: &FileMetrics) -> TestScore {
    score_file(
        metrics.path.clone(),
        &metrics.tests,
        metrics.total_assertions,
        metrics.total_mocks,
    )
}

fn clamp_score(raw: f64) -> u32 {
    // `as` truncates toward zero and saturates
    (raw as i64).clamp(0, 100) as u32
}

/// Round half-to-even on the exact binary value, like Python's `round(x, 1)`.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
