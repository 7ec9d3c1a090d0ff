//! test-grader - static quality grading for pytest and Jest test files.
//!
//! Each test file is reduced to per-test metrics (assertions, mocks, body
//! size, detected issues) and scored from 0 to 100.
//!
//! # Supported Languages
//!
//! Python (tree-sitter), JavaScript and TypeScript (pattern matching)
//!
//! # Example
//!
//! ```no_run
//! use test_grader::config::Config;
//! use test_grader::core::FileSet;
//! use test_grader::grader::{average_score, Grader};
//!
//! let config = Config::default();
//! let files = FileSet::from_path("tests", &config).unwrap();
//! let scores = Grader::new().grade_files(&files).unwrap();
//! println!("Graded {} files, average {:.0}", scores.len(), average_score(&scores));
//! ```

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod grader;
pub mod output;
pub mod parser;
pub mod score;

pub use core::{Error, Extractor, FileMetrics, Result, TestMetrics};
pub use grader::Grader;
pub use score::TestScore;
