//! Grades test files: load, extract, score.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::analyzers::Extractors;
use crate::core::{FileSet, Language, Result, SourceFile};
use crate::score::{score_metrics, TestScore};

/// Runs the extractors over test files and scores the results.
#[derive(Default)]
pub struct Grader {
    extractors: Extractors,
}

impl Grader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grade every file in the set, in set order.
    pub fn grade_files(&self, files: &FileSet) -> Result<Vec<TestScore>> {
        let start = Instant::now();

        let scores = files
            .files()
            .par_iter()
            .map(|path| self.grade_path(path))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            "Grading completed in {:?}: {} files, average {:.1}",
            start.elapsed(),
            scores.len(),
            average_score(&scores)
        );

        Ok(scores)
    }

    /// Grade a single file from disk.
    pub fn grade_path(&self, path: &Path) -> Result<TestScore> {
        let file = SourceFile::load(path)?;
        Ok(self.grade_file(&file))
    }

    /// Grade an already loaded file.
    pub fn grade_file(&self, file: &SourceFile) -> TestScore {
        self.grade_source(&file.display_path(), file.language, &file.content_str())
    }

    /// Grade in-memory source.
    pub fn grade_source(&self, path: &str, language: Language, source: &str) -> TestScore {
        let extractor = self.extractors.for_language(language);
        let metrics = extractor.extract(path, source);
        let score = score_metrics(&metrics);

        tracing::debug!(
            "{}: {} tests via {}, score {}",
            path,
            score.tests_count,
            extractor.name(),
            score.score
        );

        score
    }
}

/// Mean score over files, 0.0 when there are none.
pub fn average_score(scores: &[TestScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: u64 = scores.iter().map(|s| u64::from(s.score)).sum();
    total as f64 / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const GOOD_PYTHON: &str = "\
def test_addition_is_commutative():
    a = 2
    b = 3
    assert a + b == b + a
    assert a + b == 5

def test_subtraction_inverts_addition():
    a = 7
    b = 4
    assert (a - b) + b == a
    assert a - b == 3
";

    const GOOD_JEST: &str = "\
test('adds two numbers', () => {
  const total = add(2, 3);
  expect(total).toBe(5);
  expect(typeof total).toBe('number');
});
";

    #[test]
    fn test_grade_source_python() {
        let grader = Grader::new();
        let score = grader.grade_source("test_math.py", Language::Python, GOOD_PYTHON);
        assert_eq!(score.tests_count, 2);
        assert_eq!(score.avg_assertions, 2.0);
        assert!(score.issues.is_empty(), "{:?}", score.issues);
        // 50 + 20
        assert_eq!(score.score, 70);
    }

    #[test]
    fn test_grade_source_jest() {
        let grader = Grader::new();
        let score = grader.grade_source("math.test.js", Language::JavaScript, GOOD_JEST);
        assert_eq!(score.tests_count, 1);
        assert_eq!(score.avg_assertions, 2.0);
        assert!(score.issues.is_empty(), "{:?}", score.issues);
    }

    #[test]
    fn test_grade_source_unparseable_python() {
        let grader = Grader::new();
        let score = grader.grade_source("test_broken.py", Language::Python, "def test_x(:\n");
        assert_eq!(score.score, 0);
        assert_eq!(score.issues, vec!["No tests found"]);
    }

    #[test]
    fn test_grade_files_in_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("test_math.py"), GOOD_PYTHON).unwrap();
        fs::write(temp.path().join("math.test.js"), GOOD_JEST).unwrap();
        fs::write(temp.path().join("test_empty.py"), "import os\n").unwrap();

        let files = FileSet::from_path_default(temp.path()).unwrap();
        let scores = Grader::new().grade_files(&files).unwrap();

        let paths: Vec<_> = files.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        let scored: Vec<_> = scores.iter().map(|s| s.path.clone()).collect();
        assert_eq!(scored, paths);
        assert_eq!(scores.len(), 3);

        let empty = scores.iter().find(|s| s.path.ends_with("test_empty.py")).unwrap();
        assert_eq!(empty.score, 0);
    }

    #[test]
    fn test_grade_path_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = Grader::new().grade_path(&temp.path().join("test_gone.py"));
        assert!(result.is_err());
    }

    #[test]
    fn test_average_score() {
        assert_eq!(average_score(&[]), 0.0);

        let grader = Grader::new();
        let a = grader.grade_source("test_a.py", Language::Python, GOOD_PYTHON);
        let b = grader.grade_source("test_b.py", Language::Python, "");
        assert_eq!(average_score(&[a, b]), 35.0);
    }
}
