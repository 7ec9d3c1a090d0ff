//! Language detection and enumeration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Languages whose test files can be graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
}

impl Language {
    /// Detect language from file path based on extension.
    pub fn detect(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        Self::from_extension(extension)
    }

    /// Get language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" => Some(Self::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" | "tsx" => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Get the display name for the language.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
        }
    }

    /// Whether files of this language go through a real syntax tree.
    ///
    /// Python is parsed with tree-sitter; the JavaScript family is scanned
    /// with regular expressions.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Python)
    }

    /// File name patterns that mark a file as a test file.
    pub fn test_file_patterns(&self) -> &'static [&'static str] {
        match self {
            Self::Python => &["test_*.py", "*_test.py"],
            Self::JavaScript => &["*.test.js", "*.spec.js"],
            Self::TypeScript => &["*.test.ts", "*.spec.ts"],
        }
    }

    /// All supported languages.
    pub fn all() -> &'static [Language] {
        &[Self::Python, Self::JavaScript, Self::TypeScript]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
