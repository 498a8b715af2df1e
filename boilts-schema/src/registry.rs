//! Enum-name registry.
//!
//! The registry is loaded once through [`EnumRegistryBuilder`] and frozen by
//! [`EnumRegistryBuilder::build`]. The frozen [`EnumRegistry`] only answers
//! membership queries, so every input must be loaded before resolution starts.

use crate::types::ModelFile;
use std::collections::HashSet;

/// Read-only set of type names known to be enums.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumRegistry {
    names: HashSet<String>,
}

impl EnumRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts loading a new registry.
    #[must_use]
    pub fn builder() -> EnumRegistryBuilder {
        EnumRegistryBuilder::new()
    }

    /// Returns true if `name` is a registered enum type.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Builder for loading an [`EnumRegistry`].
#[derive(Debug, Default)]
pub struct EnumRegistryBuilder {
    names: HashSet<String>,
}

impl EnumRegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one enum type name.
    #[must_use]
    pub fn insert(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    /// Registers every `type X string` declaration of a parsed model file.
    #[must_use]
    pub fn extend_from_model(mut self, file: &ModelFile) -> Self {
        for name in file.string_types() {
            tracing::debug!("Registering enum type {}", name);
            self.names.insert(name.to_string());
        }
        self
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> EnumRegistry {
        tracing::debug!("Enum registry frozen with {} names", self.names.len());
        EnumRegistry { names: self.names }
    }
}

impl<S: Into<String>> FromIterator<S> for EnumRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
