use proptest::prelude::*;

use test_grader::analyzers::{JestExtractor, PytestExtractor};
use test_grader::core::{Extractor, Language, TestMetrics};
use test_grader::grader::Grader;
use test_grader::score::score_file;

fn metrics(name: &str, assertions: usize, mocks: usize, issues: usize) -> TestMetrics {
    TestMetrics {
        name: name.to_string(),
        assertions,
        mocks,
        lines: 5,
        issues: (0..issues).map(|i| format!("issue {i}")).collect(),
    }
}

fn arb_tests() -> impl Strategy<Value = Vec<TestMetrics>> {
    prop::collection::vec((0usize..12, 0usize..10, 0usize..5), 0..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (a, m, k))| metrics(&format!("test_case_{i}"), a, m, k))
            .collect()
    })
}

fn totals(tests: &[TestMetrics]) -> (usize, usize) {
    (
        tests.iter().map(|t| t.assertions).sum(),
        tests.iter().map(|t| t.mocks).sum(),
    )
}

// ---------------------------------------------------------------------------
// Score property tests
// ---------------------------------------------------------------------------

proptest! {
    /// Scores stay within 0..=100 for any input.
    #[test]
    fn score_bounded(tests in arb_tests()) {
        let (assertions, mocks) = totals(&tests);
        let score = score_file("test_x.py", &tests, assertions, mocks);
        prop_assert!(score.score <= 100);
        prop_assert_eq!(score.tests_count, tests.len());
    }

    /// More assertions never lower the score.
    #[test]
    fn more_assertions_never_lower_score(
        tests in arb_tests(),
        extra in 0usize..20,
    ) {
        let (assertions, mocks) = totals(&tests);
        let base = score_file("test_x.py", &tests, assertions, mocks);
        let more = score_file("test_x.py", &tests, assertions + extra, mocks);
        prop_assert!(more.score >= base.score);
    }

    /// More mocks never raise the score.
    #[test]
    fn more_mocks_never_raise_score(
        tests in arb_tests(),
        extra in 0usize..20,
    ) {
        let (assertions, mocks) = totals(&tests);
        let base = score_file("test_x.py", &tests, assertions, mocks);
        let more = score_file("test_x.py", &tests, assertions, mocks + extra);
        prop_assert!(more.score <= base.score);
    }

    /// One extra issue costs exactly five points away from the clamps.
    #[test]
    fn extra_issue_costs_five(assertions in 0usize..4, mocks in 0usize..2) {
        let tests = vec![metrics("test_single_case", assertions, mocks, 0)];
        let with_issue = vec![metrics("test_single_case", assertions, mocks, 1)];
        let base = score_file("test_x.py", &tests, assertions, mocks);
        let penalized = score_file("test_x.py", &with_issue, assertions, mocks);
        prop_assert!(base.score >= 5);
        prop_assert_eq!(base.score - penalized.score, 5);
    }

    /// Flattened issues match the per-test issues in count and order.
    #[test]
    fn issues_flattened(tests in arb_tests()) {
        let (assertions, mocks) = totals(&tests);
        let score = score_file("test_x.py", &tests, assertions, mocks);
        if tests.is_empty() {
            prop_assert_eq!(score.issues, vec!["No tests found".to_string()]);
        } else {
            let expected: Vec<String> = tests
                .iter()
                .flat_map(|t| t.issues.iter().map(move |i| format!("{}: {}", t.name, i)))
                .collect();
            prop_assert_eq!(score.issues, expected);
        }
    }
}

// ---------------------------------------------------------------------------
// Extractor property tests
// ---------------------------------------------------------------------------

proptest! {
    /// Totals always equal the per-test sums.
    #[test]
    fn pytest_totals_consistent(
        body in prop::collection::vec(
            prop_oneof![
                Just("    assert x == 1\n"),
                Just("    self.assertEqual(a, b)\n"),
                Just("    m = Mock()\n"),
                Just("    p = patch('mod.attr')\n"),
                Just("    x = compute()\n"),
                Just("    # note\n"),
            ],
            1..10,
        ),
        count in 1usize..4,
    ) {
        let mut source = String::new();
        for i in 0..count {
            source.push_str(&format!("def test_generated_case_{i}():\n"));
            source.push_str(&body.concat());
            source.push_str("    pass\n\n");
        }
        let file = PytestExtractor::new().extract("test_gen.py", &source);
        prop_assert_eq!(file.tests.len(), count);
        prop_assert_eq!(
            file.total_assertions,
            file.tests.iter().map(|t| t.assertions).sum::<usize>()
        );
        prop_assert_eq!(
            file.total_mocks,
            file.tests.iter().map(|t| t.mocks).sum::<usize>()
        );
    }

    /// The pattern extractor never panics and finds every declaration.
    #[test]
    fn jest_counts_declarations(
        names in prop::collection::vec("[a-z ]{1,20}", 0..6),
        filler in "[a-z(){};\n ]{0,40}",
    ) {
        let mut source = String::new();
        for name in &names {
            source.push_str(&format!("test('{name}', () => {{\n{filler}\n  expect(v).toBe(1);\n}});\n"));
        }
        let file = JestExtractor::new().extract("gen.test.js", &source);
        prop_assert!(file.tests.len() >= names.len());
        prop_assert!(file.total_assertions >= names.len());
    }

    /// Grading arbitrary text never panics and stays in bounds.
    #[test]
    fn grading_arbitrary_text_bounded(source in "\\PC{0,200}") {
        let grader = Grader::new();
        for language in Language::all() {
            let score = grader.grade_source("test_any", *language, &source);
            prop_assert!(score.score <= 100);
        }
    }
}

#[test]
fn identical_input_produces_identical_output() {
    let source = "def test_stable_output_value():\n    x = 1\n    y = 2\n    assert x + y == 3\n";
    let grader = Grader::new();
    let first = grader.grade_source("test_stable.py", Language::Python, source);
    let second = grader.grade_source("test_stable.py", Language::Python, source);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
