//! Extractor trait implemented by each test front-end.

use super::FileMetrics;

/// Turns the text of one test file into per-test metrics.
///
/// Implementations never fail: source they cannot understand yields a
/// [`FileMetrics`] with no tests.
pub trait Extractor: Send + Sync {
    /// Unique identifier for this extractor.
    fn name(&self) -> &'static str;

    /// Extract metrics for every test declared in `source`.
    fn extract(&self, path: &str, source: &str) -> FileMetrics;
}
