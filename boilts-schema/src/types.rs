//! Model source definitions.
//!
//! This module contains the data structures the structural parser produces:
//! type expressions, field declarations, structs and named type aliases.

use std::fmt;

/// Declared type of a field, as written in the model source.
///
/// The resolver understands the first three variants. Any other shape the
/// parser meets is kept verbatim in [`TypeExpression::Unsupported`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpression {
    /// Bare identifier, e.g. `string`.
    Identifier(String),
    /// Pointer to another expression, e.g. `*User`.
    Pointer(Box<TypeExpression>),
    /// Package-qualified selector, e.g. `null.String`.
    Qualified {
        /// Expression left of the dot.
        inner: Box<TypeExpression>,
        /// Name right of the dot.
        selector: String,
    },
    /// Shape outside the closed vocabulary (slices, maps, funcs, ...).
    Unsupported(String),
}

impl TypeExpression {
    /// Creates an identifier expression.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Wraps an expression in a pointer.
    #[must_use]
    pub fn pointer(inner: Self) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Creates a qualified selector expression.
    #[must_use]
    pub fn qualified(inner: Self, selector: impl Into<String>) -> Self {
        Self::Qualified {
            inner: Box::new(inner),
            selector: selector.into(),
        }
    }

    /// Returns true if the expression is inside the supported vocabulary.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Identifier(_) => true,
            Self::Pointer(inner) => inner.is_supported(),
            Self::Qualified { inner, .. } => inner.is_supported(),
            Self::Unsupported(_) => false,
        }
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => f.write_str(name),
            Self::Pointer(inner) => write!(f, "*{inner}"),
            Self::Qualified { inner, selector } => write!(f, "{inner}.{selector}"),
            Self::Unsupported(text) => f.write_str(text),
        }
    }
}

/// A single named struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub ty: TypeExpression,
    /// Raw tag text including its backtick delimiters.
    pub tag: Option<String>,
    /// Source line of the declaration (1-based, 0 when synthesized).
    pub line: usize,
}

impl FieldDeclaration {
    /// Creates a field declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeExpression, tag: Option<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            tag,
            line: 0,
        }
    }

    /// Sets the source line.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// Struct type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    /// Struct name.
    pub name: String,
    /// Named fields in declaration order. Embedded fields are not listed.
    pub fields: Vec<FieldDeclaration>,
    /// Source line of the declaration.
    pub line: usize,
}

impl StructDef {
    /// Creates a new empty struct definition.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            line,
        }
    }

    /// Adds a field to the struct.
    pub fn add_field(&mut self, field: FieldDeclaration) {
        self.fields.push(field);
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Named non-struct type declaration, e.g. `type UserRole string`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlias {
    /// Declared name.
    pub name: String,
    /// Underlying type.
    pub ty: TypeExpression,
    /// Source line of the declaration.
    pub line: usize,
}

impl TypeAlias {
    /// Returns true if the underlying type is the builtin `string`.
    #[must_use]
    pub fn is_string_type(&self) -> bool {
        matches!(&self.ty, TypeExpression::Identifier(name) if name == "string")
    }
}

/// One parsed model source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelFile {
    /// Package name.
    pub package: String,
    /// Struct declarations in source order.
    pub structs: Vec<StructDef>,
    /// Named non-struct type declarations in source order.
    pub aliases: Vec<TypeAlias>,
}

impl ModelFile {
    /// Creates an empty model file for the given package.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            structs: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Looks up a struct by name.
    #[must_use]
    pub fn get_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Iterates over the names of declared string types.
    pub fn string_types(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .filter(|a| a.is_string_type())
            .map(|a| a.name.as_str())
    }

    /// Total number of named fields across all structs.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.structs.iter().map(|s| s.fields.len()).sum()
    }
}
