//! Syntax errors raised while lexing or parsing a document.

use thiserror::Error;

/// A lexing or parsing failure at a known source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at {line}:{column}: {message}")]
pub struct SyntaxError {
    /// What went wrong.
    pub message: String,
    /// Line of the offending input (1-indexed).
    pub line: usize,
    /// Column of the offending input (1-indexed).
    pub column: usize,
}

impl SyntaxError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}
