//! Test front-ends, one per ecosystem.
//!
//! - [`pytest`]: Python files, parsed with tree-sitter.
//! - [`jest`]: JavaScript/TypeScript files, segmented with regular expressions.
//!
//! Each front-end keeps its own constants and thresholds; they differ on
//! purpose and are not shared.

pub mod jest;
pub mod pytest;

use crate::core::{Extractor, Language};

// Re-export extractor types for convenience
pub use jest::Extractor as JestExtractor;
pub use pytest::Extractor as PytestExtractor;

/// Both front-ends, built once and shared across files.
#[derive(Default)]
pub struct Extractors {
    pytest: PytestExtractor,
    jest: JestExtractor,
}

impl Extractors {
    pub fn new() -> Self {
        Self::default()
    }

    /// The front-end responsible for a language.
    pub fn for_language(&self, language: Language) -> &dyn Extractor {
        if language.is_structured() {
            &self.pytest
        } else {
            &self.jest
        }
    }
}
