//! Error types for model source parsing.

use thiserror::Error;

/// Error type for model source parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// String or raw string literal without a closing quote.
    #[error("unterminated string literal starting at line {line}")]
    UnterminatedString {
        /// Line where the literal starts.
        line: usize,
    },

    /// Block comment without a closing `*/`.
    #[error("unterminated block comment starting at line {line}")]
    UnterminatedComment {
        /// Line where the comment starts.
        line: usize,
    },

    /// Token that does not fit the expected grammar.
    #[error("line {line}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        /// Line of the offending token.
        line: usize,
        /// Description of what was expected.
        expected: String,
        /// Text of the offending token.
        found: String,
    },

    /// Input ended in the middle of a construct.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// Description of what was expected.
        expected: String,
    },

    /// Closing delimiter without a matching opener.
    #[error("line {line}: unbalanced delimiter '{delimiter}'")]
    UnbalancedDelimiter {
        /// Line of the delimiter.
        line: usize,
        /// The delimiter character.
        delimiter: char,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates an unexpected token error.
    pub fn unexpected(line: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            line,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }
}
