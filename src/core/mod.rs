//! Core types and traits for test grading.

mod error;
mod extractor;
mod file_set;
mod language;
mod metrics;
mod source_file;

pub use error::{Error, Result};
pub use extractor::Extractor;
pub use file_set::FileSet;
pub use language::Language;
pub use metrics::{FileMetrics, TestMetrics};
pub use source_file::SourceFile;
