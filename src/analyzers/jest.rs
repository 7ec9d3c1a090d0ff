//! Jest front-end: metrics from JavaScript/TypeScript test files.
//!
//! There is no parser here. Each `test('...')` / `it('...')` declaration
//! owns the text up to the next declaration (or end of file). Nested or
//! commented-out declarations therefore shift the spans; scores are
//! calibrated against exactly this segmentation.

use regex::Regex;

use crate::core::{Extractor as ExtractorTrait, FileMetrics, TestMetrics};

/// Test declaration: `test(` or `it(` followed by a quoted title.
pub const DECLARATION_PATTERN: &str = r#"(?:test|it)\s*\(\s*['"`]([^'"`]+)['"`]"#;

/// Assertion call.
pub const ASSERTION_PATTERN: &str = r"expect\s*\(";

/// Namespace of the mocking facility.
pub const MOCK_NAMESPACE: &str = "jest";

/// Mock factories under [`MOCK_NAMESPACE`].
pub const MOCK_FACTORIES: &[&str] = &["fn", "mock", "spyOn"];

/// The one trivial assertion recognisable from text alone.
pub const TRIVIAL_PATTERN: &str = r"expect\s*\(\s*true\s*\)\s*\.toBe\s*\(\s*true\s*\)";

/// More mocks than this is an issue.
pub const MAX_MOCKS: usize = 3;

/// A span with fewer lines than this is too short.
pub const MIN_LINES: usize = 3;

/// Titles shorter than this are not descriptive.
pub const MIN_NAME_LEN: usize = 5;

/// Pattern extractor for Jest-style test files.
pub struct Extractor {
    declaration: Regex,
    assertion: Regex,
    mock: Regex,
    trivial: Regex,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Create a new Jest extractor.
    pub fn new() -> Self {
        let mock = format!(
            r"{}\.({})\s*\(",
            regex::escape(MOCK_NAMESPACE),
            MOCK_FACTORIES.join("|")
        );
        Self {
            declaration: Regex::new(DECLARATION_PATTERN).expect("valid regex"),
            assertion: Regex::new(ASSERTION_PATTERN).expect("valid regex"),
            mock: Regex::new(&mock).expect("valid regex"),
            trivial: Regex::new(TRIVIAL_PATTERN).expect("valid regex"),
        }
    }

    /// Metrics for one declaration and its span.
    fn analyze_block(&self, name: &str, body: &str) -> TestMetrics {
        let assertions = self.assertion.find_iter(body).count();
        let mocks = self.mock.find_iter(body).count();
        let lines = body.matches('\n').count() + 1;

        let mut issues = Vec::new();

        if assertions == 0 {
            issues.push("No assertions found".to_string());
        }

        if self.trivial.is_match(body) {
            issues.push("Trivial assertion (expect(true).toBe(true))".to_string());
        }

        if mocks > MAX_MOCKS {
            issues.push(format!("Too many mocks ({mocks})"));
        }

        if lines < MIN_LINES {
            issues.push("Test body too short".to_string());
        }

        if name.chars().count() < MIN_NAME_LEN {
            issues.push("Test name not descriptive".to_string());
        }

        TestMetrics {
            name: name.to_string(),
            assertions,
            mocks,
            lines,
            issues,
        }
    }
}

impl ExtractorTrait for Extractor {
    fn name(&self) -> &'static str {
        "jest"
    }

    fn extract(&self, path: &str, source: &str) -> FileMetrics {
        let declarations: Vec<(usize, &str)> = self
            .declaration
            .captures_iter(source)
            .filter_map(|caps| Some((caps.get(0)?.start(), caps.get(1)?.as_str())))
            .collect();

        let tests = declarations
            .iter()
            .enumerate()
            .map(|(i, &(start, name))| {
                let end = declarations
                    .get(i + 1)
                    .map_or(source.len(), |&(next, _)| next);
                self.analyze_block(name, &source[start..end])
            })
            .collect();

        FileMetrics::new(path, tests)
    }
}
