//! Error types for type resolution and code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Model source parsing error.
    #[error("model parse error: {0}")]
    Parse(#[from] boilts_schema::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Type expression outside the supported vocabulary.
    #[error("unsupported type expression '{node}'")]
    UnsupportedTypeExpression {
        /// Offending expression as written in source.
        node: String,
    },

    /// Field whose declared type cannot be resolved.
    #[error("unsupported type expression '{node}' in field '{field}'")]
    UnsupportedField {
        /// Field name.
        field: String,
        /// Offending expression as written in source.
        node: String,
    },
}

impl CodegenError {
    /// Creates an unsupported type expression error.
    pub fn unsupported(node: impl Into<String>) -> Self {
        Self::UnsupportedTypeExpression { node: node.into() }
    }

    /// Attaches a field name to an unsupported type expression error.
    #[must_use]
    pub fn in_field(self, field: impl Into<String>) -> Self {
        match self {
            Self::UnsupportedTypeExpression { node } => Self::UnsupportedField {
                field: field.into(),
                node,
            },
            other => other,
        }
    }
}
