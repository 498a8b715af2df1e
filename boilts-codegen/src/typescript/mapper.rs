//! Canonical type name to TypeScript type syntax.

use crate::normalizer::{SEQUENCE_MARKER, TEMPORAL_TYPE};
use crate::resolver::TypeDescriptor;

/// Suffix SQLBoiler uses for generated slice types.
pub const SLICE_SUFFIX: &str = "Slice";

/// Canonical boolean type name.
pub const BOOLEAN_TYPE: &str = "bool";

/// Names used when rendering target syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSyntax {
    /// Type for every integer and floating-point value.
    pub numeric: String,
    /// Type replacing the canonical boolean name.
    pub boolean: String,
    /// Type replacing the canonical temporal name.
    pub date: String,
    /// Suffix turning an element type into a collection.
    pub collection: String,
}

impl Default for TargetSyntax {
    fn default() -> Self {
        Self {
            numeric: "number".to_string(),
            boolean: "boolean".to_string(),
            date: "Date".to_string(),
            collection: "[]".to_string(),
        }
    }
}

/// Maps normalized descriptors to target type syntax.
#[derive(Debug, Clone, Default)]
pub struct TargetMapper {
    syntax: TargetSyntax,
}

impl TargetMapper {
    /// Creates a mapper with the given target names.
    #[must_use]
    pub fn new(syntax: TargetSyntax) -> Self {
        Self { syntax }
    }

    /// Returns the target names in use.
    #[must_use]
    pub fn syntax(&self) -> &TargetSyntax {
        &self.syntax
    }

    /// Renders a descriptor's formatted name as target syntax.
    ///
    /// The optional marker is dropped: the output does not distinguish
    /// optional from required values.
    #[must_use]
    pub fn to_target_syntax(&self, descriptor: &TypeDescriptor) -> String {
        self.map_name(&descriptor.formatted_name)
    }

    /// Renders a normalized type name as target syntax.
    #[must_use]
    pub fn map_name(&self, formatted: &str) -> String {
        let mut value = formatted.strip_prefix('*').unwrap_or(formatted).to_string();

        if is_numeric(&value) {
            value = self.collapse_numeric(&value);
        }
        value = value.replace(BOOLEAN_TYPE, &self.syntax.boolean);
        value = value.replace(TEMPORAL_TYPE, &self.syntax.date);

        if let Some(element) = value.strip_suffix(SLICE_SUFFIX) {
            return format!("{element}{}", self.syntax.collection);
        }
        if let Some(element) = value.strip_prefix(SEQUENCE_MARKER) {
            return format!("{element}{}", self.syntax.collection);
        }
        value
    }

    /// Replaces the value with the numeric name, keeping any sequence-of
    /// marker so `IntSlice` still renders as a collection.
    fn collapse_numeric(&self, value: &str) -> String {
        let numeric = &self.syntax.numeric;
        if value.ends_with(SLICE_SUFFIX) {
            format!("{numeric}{SLICE_SUFFIX}")
        } else if value.starts_with(SEQUENCE_MARKER) {
            format!("{SEQUENCE_MARKER}{numeric}")
        } else {
            numeric.clone()
        }
    }
}

/// Substring test for integer and floating-point names, ignoring ASCII case.
fn is_numeric(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.contains("int") || lower.contains("float")
}
