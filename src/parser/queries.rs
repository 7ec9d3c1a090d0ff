//! Tree-sitter queries and node kinds used by the structured front-end.

/// Python grammar node kinds and queries.
pub mod python {
    /// Every function definition with its name, at any depth.
    pub const FUNCTION_DEFINITIONS: &str =
        "(function_definition name: (identifier) @name) @function";

    pub const FUNCTION_DEFINITION: &str = "function_definition";
    pub const DECORATED_DEFINITION: &str = "decorated_definition";
    pub const DECORATOR: &str = "decorator";
    pub const ASYNC_KEYWORD: &str = "async";
    pub const ASSERT_STATEMENT: &str = "assert_statement";
    pub const CALL: &str = "call";
    pub const ATTRIBUTE: &str = "attribute";
    pub const IDENTIFIER: &str = "identifier";
    pub const COMMENT: &str = "comment";
    pub const COMPARISON_OPERATOR: &str = "comparison_operator";
    pub const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";

    /// Python 2 statements the grammar still accepts.
    pub const LEGACY_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

    /// Literal node kinds.
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
    pub const NONE: &str = "none";
    pub const INTEGER: &str = "integer";
    pub const FLOAT: &str = "float";
    pub const STRING: &str = "string";
    pub const CONCATENATED_STRING: &str = "concatenated_string";
    pub const ELLIPSIS: &str = "ellipsis";
    pub const INTERPOLATION: &str = "interpolation";
}
