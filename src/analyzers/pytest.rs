//! pytest front-end: metrics from Python test files via tree-sitter.
//!
//! A test is any `def` whose name starts with `test_`, at module level,
//! inside a class, or nested in another function. Source that does not parse
//! cleanly yields no tests at all.

use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use crate::core::{Extractor as ExtractorTrait, FileMetrics, Language, TestMetrics};
use crate::parser::queries::python as kinds;
use crate::parser::{self, get_tree_sitter_language, ParseResult, Parser};

/// Prefix that marks a function as a test.
pub const TEST_PREFIX: &str = "test_";

/// Attribute calls starting with this prefix count as assertions
/// (`self.assertEqual`, `mock.assert_called_once`).
pub const ASSERT_METHOD_PREFIX: &str = "assert";

/// Mock factories recognised when called as an attribute (`mock.patch(...)`).
pub const ATTRIBUTE_MOCKS: &[&str] = &["patch", "Mock", "MagicMock", "mock_open"];

/// Mock factories recognised when called by bare name (`patch(...)`).
pub const NAME_MOCKS: &[&str] = &["patch", "Mock", "MagicMock"];

/// More mocks than this is an issue.
pub const MAX_MOCKS: usize = 3;

/// A body with this many top-level statements or fewer is too short.
pub const MIN_BODY_STATEMENTS: usize = 2;

/// Names shorter than this are not descriptive.
pub const MIN_NAME_LEN: usize = 10;

/// Structured extractor for pytest/unittest files.
pub struct Extractor {
    parser: Parser,
    query: Option<Query>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Create a new pytest extractor.
    pub fn new() -> Self {
        let query = get_tree_sitter_language(Language::Python, Path::new(""))
            .ok()
            .and_then(|lang| Query::new(&lang, kinds::FUNCTION_DEFINITIONS).ok());
        if query.is_none() {
            tracing::warn!("Python test function query failed to compile");
        }
        Self {
            parser: Parser::new(),
            query,
        }
    }

    /// Find every test function in source order.
    fn test_functions<'t>(&self, parsed: &'t ParseResult) -> Vec<Node<'t>> {
        let Some(query) = &self.query else {
            return Vec::new();
        };
        let Some(function_idx) = query.capture_index_for_name("function") else {
            return Vec::new();
        };
        let Some(name_idx) = query.capture_index_for_name("name") else {
            return Vec::new();
        };

        let mut functions = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, parsed.root_node(), parsed.source.as_slice());
        while let Some(query_match) = matches.next() {
            let mut function = None;
            let mut is_test = false;
            for capture in query_match.captures {
                if capture.index == function_idx {
                    function = Some(capture.node);
                } else if capture.index == name_idx {
                    is_test = parsed.node_text(&capture.node).starts_with(TEST_PREFIX);
                }
            }
            if let Some(node) = function.filter(|n| is_test && !is_async(n)) {
                functions.push(node);
            }
        }
        functions.sort_by_key(|n| n.start_byte());
        functions
    }
}

impl ExtractorTrait for Extractor {
    fn name(&self) -> &'static str {
        "pytest"
    }

    fn extract(&self, path: &str, source: &str) -> FileMetrics {
        let parsed = match self
            .parser
            .parse(source.as_bytes(), Language::Python, Path::new(path))
        {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("{e}; treating {path} as having no tests");
                return FileMetrics::empty(path);
            }
        };

        if parsed.has_syntax_errors() || has_legacy_statement(parsed.root_node()) {
            tracing::debug!("{path} has syntax errors; no tests extracted");
            return FileMetrics::empty(path);
        }

        let tests = self
            .test_functions(&parsed)
            .into_iter()
            .map(|func| analyze_test_function(&parsed, func))
            .collect();

        FileMetrics::new(path, tests)
    }
}

/// Raw counts gathered from one walk over a test function.
#[derive(Default)]
struct Counts<'t> {
    assertions: usize,
    mocks: usize,
    assert_statements: Vec<Node<'t>>,
}

fn analyze_test_function<'t>(parsed: &'t ParseResult, func: Node<'t>) -> TestMetrics {
    let name = func
        .child_by_field_name("name")
        .map(|n| parsed.node_text(&n).to_string())
        .unwrap_or_default();

    let mut counts = Counts::default();
    // Decorators belong to the function, so `@patch(...)` counts as a mock.
    for decorator in decorators(func) {
        count_node(parsed, decorator, &mut counts);
    }
    count_node(parsed, func, &mut counts);

    let body_statements = func
        .child_by_field_name("body")
        .map(statement_count)
        .unwrap_or(0);

    let (start, end) = parser::line_span(&func);
    let lines = end.checked_sub(start).map_or(1, |span| span + 1);

    let mut issues = Vec::new();

    if counts.assertions == 0 {
        issues.push("No assertions found".to_string());
    } else if counts.assertions == 1 {
        for stmt in &counts.assert_statements {
            if is_trivial_assertion(parsed, *stmt) {
                issues.push("Trivial assertion (always true)".to_string());
            }
        }
    }

    if counts.mocks > MAX_MOCKS {
        issues.push(format!("Too many mocks ({})", counts.mocks));
    }

    if body_statements <= MIN_BODY_STATEMENTS {
        issues.push("Test body too short".to_string());
    }

    if name == TEST_PREFIX {
        issues.push("Empty test name".to_string());
    } else if name.chars().count() < MIN_NAME_LEN {
        issues.push("Test name not descriptive".to_string());
    }

    TestMetrics {
        name,
        assertions: counts.assertions,
        mocks: counts.mocks,
        lines,
        issues,
    }
}

fn count_node<'t>(parsed: &'t ParseResult, node: Node<'t>, counts: &mut Counts<'t>) {
    match node.kind() {
        kinds::ASSERT_STATEMENT => {
            counts.assertions += 1;
            counts.assert_statements.push(node);
        }
        kinds::CALL => {
            if let Some(callee) = node.child_by_field_name("function") {
                match callee.kind() {
                    kinds::ATTRIBUTE => {
                        let attr = callee
                            .child_by_field_name("attribute")
                            .map(|a| parsed.node_text(&a))
                            .unwrap_or("");
                        if attr.starts_with(ASSERT_METHOD_PREFIX) {
                            counts.assertions += 1;
                        } else if ATTRIBUTE_MOCKS.contains(&attr) {
                            counts.mocks += 1;
                        }
                    }
                    kinds::IDENTIFIER => {
                        if NAME_MOCKS.contains(&parsed.node_text(&callee)) {
                            counts.mocks += 1;
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }

    for child in node.children(&mut node.walk()) {
        count_node(parsed, child, counts);
    }
}

/// Python 2 `print`/`exec` statements, which Python 3 rejects.
fn has_legacy_statement(root: Node<'_>) -> bool {
    let mut cursor = root.walk();
    loop {
        if kinds::LEGACY_STATEMENTS.contains(&cursor.node().kind()) {
            return true;
        }
        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return false;
            }
        }
    }
}

fn is_async(func: &Node<'_>) -> bool {
    func.child(0)
        .is_some_and(|first| first.kind() == kinds::ASYNC_KEYWORD)
}

fn decorators(func: Node<'_>) -> Vec<Node<'_>> {
    match func.parent() {
        Some(parent) if parent.kind() == kinds::DECORATED_DEFINITION => parent
            .children(&mut parent.walk())
            .filter(|c| c.kind() == kinds::DECORATOR)
            .collect(),
        _ => Vec::new(),
    }
}

/// Top-level statements in a block; comments are not statements.
fn statement_count(block: Node<'_>) -> usize {
    block
        .named_children(&mut block.walk())
        .filter(|c| c.kind() != kinds::COMMENT)
        .count()
}

/// `assert True`, or `assert <lit> == <lit>` with equal literals.
fn is_trivial_assertion(parsed: &ParseResult, stmt: Node<'_>) -> bool {
    let Some(test) = first_expression(stmt).map(unwrap_parens) else {
        return false;
    };

    if test.kind() == kinds::TRUE {
        return true;
    }

    if test.kind() == kinds::COMPARISON_OPERATOR {
        let operators: Vec<_> = test
            .children_by_field_name("operators", &mut test.walk())
            .collect();
        if operators.len() != 1 || operators[0].kind() != "==" {
            return false;
        }
        let operands: Vec<_> = test
            .named_children(&mut test.walk())
            .filter(|c| c.kind() != kinds::COMMENT)
            .collect();
        if let [left, right] = operands.as_slice() {
            if let (Some(l), Some(r)) = (
                Literal::from_node(parsed, unwrap_parens(*left)),
                Literal::from_node(parsed, unwrap_parens(*right)),
            ) {
                return l.python_eq(&r);
            }
        }
    }

    false
}

fn first_expression(stmt: Node<'_>) -> Option<Node<'_>> {
    stmt.named_children(&mut stmt.walk())
        .find(|c| c.kind() != kinds::COMMENT)
}

fn unwrap_parens(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == kinds::PARENTHESIZED_EXPRESSION {
        match node
            .named_children(&mut node.walk())
            .find(|c| c.kind() != kinds::COMMENT)
        {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// A compile-time constant as Python's AST would see it.
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(String),
    Bytes(String),
    None,
    Ellipsis,
    /// Valid literal we do not evaluate (complex numbers, huge ints).
    Opaque(String),
}

impl Literal {
    fn from_node(parsed: &ParseResult, node: Node<'_>) -> Option<Self> {
        let text = parsed.node_text(&node);
        match node.kind() {
            kinds::TRUE => Some(Self::Bool(true)),
            kinds::FALSE => Some(Self::Bool(false)),
            kinds::NONE => Some(Self::None),
            kinds::ELLIPSIS => Some(Self::Ellipsis),
            kinds::INTEGER => Some(
                parse_int(text).map_or_else(|| Self::Opaque(text.to_string()), Self::Int),
            ),
            kinds::FLOAT => Some(
                text.replace('_', "")
                    .parse::<f64>()
                    .map_or_else(|_| Self::Opaque(text.to_string()), Self::Float),
            ),
            kinds::STRING => string_literal(node, text),
            kinds::CONCATENATED_STRING => {
                let mut parts = Vec::new();
                for part in node.named_children(&mut node.walk()) {
                    if part.kind() == kinds::COMMENT {
                        continue;
                    }
                    parts.push(string_literal(part, parsed.node_text(&part))?);
                }
                concat_strings(parts)
            }
            _ => None,
        }
    }

    /// Equality with Python semantics for constants.
    fn python_eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return match (a, b) {
                (Number::Int(a), Number::Int(b)) => a == b,
                (a, b) => a.as_f64() == b.as_f64(),
            };
        }
        match (self, other) {
            (Self::Str(a), Self::Str(b)) | (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::None, Self::None) | (Self::Ellipsis, Self::Ellipsis) => true,
            (Self::Opaque(a), Self::Opaque(b)) => a == b,
            _ => false,
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Self::Bool(b) => Some(Number::Int(i128::from(*b))),
            Self::Int(i) => Some(Number::Int(*i)),
            Self::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

fn parse_int(text: &str) -> Option<i128> {
    let digits = text.replace('_', "").to_lowercase();
    if let Some(hex) = digits.strip_prefix("0x") {
        i128::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = digits.strip_prefix("0o") {
        i128::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = digits.strip_prefix("0b") {
        i128::from_str_radix(bin, 2).ok()
    } else {
        digits.parse().ok()
    }
}

/// Plain and bytes strings are constants; f-strings are not.
fn string_literal(node: Node<'_>, text: &str) -> Option<Literal> {
    if node.kind() != kinds::STRING {
        return None;
    }
    let has_interpolation = node
        .named_children(&mut node.walk())
        .any(|c| c.kind() == kinds::INTERPOLATION);
    let prefix_len = text
        .find(|c| c == '\'' || c == '"')
        .unwrap_or(text.len());
    let prefix = text[..prefix_len].to_lowercase();
    if has_interpolation || prefix.contains('f') {
        return None;
    }

    let quoted = &text[prefix_len..];
    let raw_body = ["\"\"\"", "'''", "\"", "'"]
        .iter()
        .find_map(|q| quoted.strip_prefix(q).and_then(|s| s.strip_suffix(q)))
        .unwrap_or(quoted);

    let is_bytes = prefix.contains('b');
    let body = if prefix.contains('r') {
        raw_body.to_string()
    } else {
        decode_escapes(raw_body, is_bytes)?
    };

    if is_bytes {
        Some(Literal::Bytes(body))
    } else {
        Some(Literal::Str(body))
    }
}

/// Value of a non-raw string body after backslash escapes.
///
/// Bytes keep one `char` per byte. `None` for escapes we do not evaluate
/// (`\N{...}`) or that do not form a valid value.
fn decode_escapes(body: &str, is_bytes: bool) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            // line continuation
            '\n' => {}
            '\r' => {
                chars.next_if_eq(&'\n');
            }
            '\\' | '\'' | '"' => out.push(escape),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0b}'),
            '0'..='7' => {
                let mut value = escape.to_digit(8)?;
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                if is_bytes && value > 0xff {
                    return None;
                }
                out.push(char::from_u32(value)?);
            }
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' if !is_bytes => out.push(hex_escape(&mut chars, 4)?),
            'U' if !is_bytes => out.push(hex_escape(&mut chars, 8)?),
            'N' if !is_bytes => return None,
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Some(out)
}

fn hex_escape(chars: &mut impl Iterator<Item = char>, digits: usize) -> Option<char> {
    let hex: String = chars.take(digits).collect();
    if hex.len() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
}

fn concat_strings(parts: Vec<Literal>) -> Option<Literal> {
    let mut text = String::new();
    let mut bytes = None;
    for part in parts {
        let (is_bytes, s) = match part {
            Literal::Str(s) => (false, s),
            Literal::Bytes(s) => (true, s),
            _ => return None,
        };
        // mixing bytes and str is a SyntaxError in Python
        if *bytes.get_or_insert(is_bytes) != is_bytes {
            return None;
        }
        text.push_str(&s);
    }
    if bytes.unwrap_or(false) {
        Some(Literal::Bytes(text))
    } else {
        Some(Literal::Str(text))
    }
}
