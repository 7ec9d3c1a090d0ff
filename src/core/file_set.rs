//! File set for collecting test files to grade.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use super::{Error, Language, Result};
use crate::config::Config;

/// A set of test files to grade, respecting .gitignore.
#[derive(Debug, Clone)]
pub struct FileSet {
    /// Root directory.
    root: PathBuf,
    /// All files in the set.
    files: Vec<PathBuf>,
}

impl FileSet {
    /// Collect test files from a file or directory path.
    pub fn from_path(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        Self::from_path_with_excludes(path, &config.exclude_dirs, &config.exclude)
    }

    /// Collect test files using the default exclusions.
    pub fn from_path_default(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path(path, &Config::default())
    }

    /// Collect test files, skipping the named directories and glob patterns.
    pub fn from_path_with_excludes(
        path: impl AsRef<Path>,
        exclude_dirs: &[String],
        exclude_patterns: &[String],
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let target = path.canonicalize()?;

        // An explicit file is graded as long as its language is known.
        if target.is_file() {
            if Language::detect(&target).is_none() {
                return Err(Error::UnsupportedLanguage { path: target });
            }
            let root = target
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| target.clone());
            return Ok(Self {
                root,
                files: vec![target],
            });
        }

        let test_names = build_glob_set(
            Language::all()
                .iter()
                .flat_map(|lang| lang.test_file_patterns().iter().copied()),
        )?;
        let excluded = build_glob_set(exclude_patterns.iter().map(String::as_str))?;

        let skip_dirs = exclude_dirs.to_vec();
        let walker = WalkBuilder::new(&target)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && skip_dirs.iter().any(|d| entry.file_name() == d.as_str()))
            })
            .build();

        let mut files = Vec::new();
        for entry in walker.flatten() {
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            let Some(file_name) = path.file_name() else {
                continue;
            };
            if !test_names.is_match(file_name) {
                continue;
            }

            let relative = path.strip_prefix(&target).unwrap_or(path);
            if excluded.is_match(relative) || excluded.is_match(path) {
                tracing::debug!("Excluding {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        // Sort for deterministic ordering
        files.sort();
        files.dedup();

        Ok(Self {
            root: target,
            files,
        })
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get all files in the set.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the file set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over files.
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

fn build_glob_set<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| Error::config(format!("invalid glob '{pattern}': {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::config(format!("invalid glob set: {e}")))
}
