//! Type expression resolution.
//!
//! Walks a field's [`TypeExpression`] into a [`TypeDescriptor`], then runs the
//! formatted name through [`normalize`].

use crate::error::CodegenError;
use crate::imports::ImportSet;
use crate::normalizer::normalize;
use boilts_schema::{EnumRegistry, TypeExpression};
use serde::Serialize;

/// Canonical description of one field's type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Dotted name as resolved, never carrying a pointer marker.
    pub original_name: String,
    /// Progressively rewritten name used by later stages.
    pub formatted_name: String,
    /// Whether `original_name` is a registered enum.
    pub is_enum: bool,
}

impl TypeDescriptor {
    /// Returns true if the formatted name carries the optional marker.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.formatted_name.starts_with('*')
    }
}

/// Resolver for field type expressions.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a EnumRegistry,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver backed by a frozen enum registry.
    #[must_use]
    pub fn new(registry: &'a EnumRegistry) -> Self {
        Self { registry }
    }

    /// Resolves the structure of an expression without normalizing it.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedTypeExpression` if the expression, or
    /// any expression nested in it, is outside the supported vocabulary.
    pub fn resolve_structure(&self, expr: &TypeExpression) -> Result<TypeDescriptor, CodegenError> {
        let (original_name, formatted_name) = walk(expr)?;
        Ok(TypeDescriptor {
            is_enum: self.registry.contains(&original_name),
            original_name,
            formatted_name,
        })
    }

    /// Resolves an expression and normalizes its formatted name.
    ///
    /// Enum membership is decided on the unnormalized original name.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedTypeExpression` for unsupported
    /// expressions. `imports` is left untouched in that case.
    pub fn resolve(
        &self,
        expr: &TypeExpression,
        imports: &mut ImportSet,
    ) -> Result<TypeDescriptor, CodegenError> {
        let structural = self.resolve_structure(expr)?;
        Ok(TypeDescriptor {
            formatted_name: normalize(&structural.formatted_name, imports),
            ..structural
        })
    }
}

/// Returns `(original_name, formatted_name)` for an expression.
fn walk(expr: &TypeExpression) -> Result<(String, String), CodegenError> {
    match expr {
        TypeExpression::Identifier(name) => Ok((name.clone(), name.clone())),
        TypeExpression::Pointer(inner) => {
            // Only the inner original name is kept.
            let (original, _) = walk(inner)?;
            let formatted = format!("*{original}");
            Ok((original, formatted))
        }
        TypeExpression::Qualified { inner, selector } => {
            let (inner_original, _) = walk(inner)?;
            let name = format!("{inner_original}.{selector}");
            Ok((name.clone(), name))
        }
        TypeExpression::Unsupported(node) => Err(CodegenError::unsupported(node.as_str())),
    }
}
