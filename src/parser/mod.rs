//! Tree-sitter parser pool for the structured front-end.

pub mod queries;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tree_sitter::{Language as TsLanguage, Node, Parser as TsParser, Tree};

use crate::core::{Error, Language, Result};

/// Thread-safe parser pool, one tree-sitter parser per language.
pub struct Parser {
    /// Cached parsers per language.
    parsers: Mutex<HashMap<Language, TsParser>>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            parsers: Mutex::new(HashMap::new()),
        }
    }

    /// Parse content with explicit language.
    pub fn parse(&self, content: &[u8], lang: Language, path: &Path) -> Result<ParseResult> {
        let ts_lang = get_tree_sitter_language(lang, path)?;

        let tree = {
            let mut parsers = self.parsers.lock();
            let parser = match parsers.entry(lang) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let mut p = TsParser::new();
                    p.set_language(&ts_lang).map_err(|e| Error::Parse {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                    entry.insert(p)
                }
            };

            parser.parse(content, None).ok_or_else(|| Error::Parse {
                path: path.to_path_buf(),
                message: "Failed to parse file".to_string(),
            })?
        };

        Ok(ParseResult {
            tree: Arc::new(tree),
            source: content.to_vec(),
        })
    }
}

/// Result of parsing a source file.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed syntax tree.
    pub tree: Arc<Tree>,
    /// Original source content.
    pub source: Vec<u8>,
}

impl ParseResult {
    /// Get the root node of the tree.
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Get text for a node.
    pub fn node_text(&self, node: &Node<'_>) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Whether tree-sitter had to recover from invalid syntax anywhere.
    pub fn has_syntax_errors(&self) -> bool {
        self.root_node().has_error()
    }
}

/// Get the tree-sitter grammar for a language.
///
/// Only Python has a grammar; the JavaScript family is handled by the
/// pattern front-end and never reaches the parser.
pub fn get_tree_sitter_language(lang: Language, path: &Path) -> Result<TsLanguage> {
    match lang {
        Language::Python => Ok(tree_sitter_python::LANGUAGE.into()),
        Language::JavaScript | Language::TypeScript => Err(Error::UnsupportedLanguage {
            path: path.to_path_buf(),
        }),
    }
}

/// Start and end line (1-indexed) of a node.
pub fn line_span(node: &Node<'_>) -> (usize, usize) {
    (node.start_position().row + 1, node.end_position().row + 1)
}
