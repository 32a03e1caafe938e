//! The operator-edited document filter expression.

use std::fmt;

use serde::Serialize;

/// Hint shown in an empty filter input.
pub const FILTER_PLACEHOLDER: &str = "Doc IDs (e.g. 1, 5, 10-100)";

/// Doc list text restricted to digits, spaces, commas and hyphens.
///
/// The expression is only constrained character-wise; whether it forms a valid
/// doc list is decided by the doc list parser. An empty expression selects every
/// document that has a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocFilterExpression(String);

impl DocFilterExpression {
    /// Builds an expression from raw operator input, dropping every character
    /// outside the allowed set.
    pub fn from_input(input: &str) -> DocFilterExpression {
        DocFilterExpression(input.chars().filter(|&c| is_filter_char(c)).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DocFilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_filter_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ' ' | ',' | '-')
}
