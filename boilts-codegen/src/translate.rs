//! Per-field translation: tag, resolution, normalization and target syntax.

use crate::error::CodegenError;
use crate::imports::ImportSet;
use crate::resolver::{TypeDescriptor, TypeResolver};
use crate::typescript::mapper::{TargetMapper, TargetSyntax};
use boilts_schema::{EnumRegistry, FieldDeclaration, TagWarning, inspect_tag};
use serde::{Serialize, Serializer};

/// Translation result for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldTranslation {
    /// Field name in the model source.
    pub field_name: String,
    /// Name from the `boil` tag, if any.
    pub mapped_name: Option<String>,
    /// Resolved and normalized type.
    pub descriptor: TypeDescriptor,
    /// Target language type syntax.
    pub target_type: String,
    /// Problem noticed while reading the tag.
    #[serde(serialize_with = "serialize_warning")]
    pub tag_warning: Option<TagWarning>,
}

impl FieldTranslation {
    /// Name to emit for this field: the mapped name, or the field name.
    #[must_use]
    pub fn member_name(&self) -> &str {
        self.mapped_name.as_deref().unwrap_or(&self.field_name)
    }
}

fn serialize_warning<S: Serializer>(
    warning: &Option<TagWarning>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match warning {
        Some(w) => serializer.serialize_some(&w.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Field that could not be translated.
#[derive(Debug)]
pub struct FieldFailure {
    /// Struct owning the field, if known.
    pub owner: Option<String>,
    /// Field name.
    pub field: String,
    /// Source line of the field.
    pub line: usize,
    /// Why translation failed.
    pub error: CodegenError,
}

/// Output of translating a batch of fields.
#[derive(Debug, Default)]
pub struct TranslationRun {
    /// Successfully translated fields, in input order.
    pub fields: Vec<FieldTranslation>,
    /// Imports recorded during this run.
    pub imports: ImportSet,
    /// Fields that could not be translated.
    pub failures: Vec<FieldFailure>,
}

impl TranslationRun {
    /// Returns true if every field translated.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Translates field declarations into target syntax.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    resolver: TypeResolver<'a>,
    mapper: TargetMapper,
}

impl<'a> Translator<'a> {
    /// Creates a translator over a frozen enum registry.
    #[must_use]
    pub fn new(registry: &'a EnumRegistry, syntax: TargetSyntax) -> Self {
        Self {
            resolver: TypeResolver::new(registry),
            mapper: TargetMapper::new(syntax),
        }
    }

    /// Returns the resolver.
    #[must_use]
    pub fn resolver(&self) -> &TypeResolver<'a> {
        &self.resolver
    }

    /// Returns the target mapper.
    #[must_use]
    pub fn mapper(&self) -> &TargetMapper {
        &self.mapper
    }

    /// Translates one field, appending required imports to `imports`.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedField` if the field's type is outside
    /// the supported vocabulary.
    pub fn translate_field(
        &self,
        field: &FieldDeclaration,
        imports: &mut ImportSet,
    ) -> Result<FieldTranslation, CodegenError> {
        let tag = inspect_tag(field);
        if let Some(warning) = &tag.warning {
            tracing::warn!("Field {} (line {}): {}", field.name, field.line, warning);
        }

        let descriptor = self
            .resolver
            .resolve(&field.ty, imports)
            .map_err(|e| e.in_field(field.name.as_str()))?;
        let target_type = self.mapper.to_target_syntax(&descriptor);

        tracing::debug!(
            "Field {}: {} -> {} -> {}",
            field.name,
            field.ty,
            descriptor.formatted_name,
            target_type
        );

        Ok(FieldTranslation {
            field_name: field.name.clone(),
            mapped_name: tag.mapped_name,
            descriptor,
            target_type,
            tag_warning: tag.warning,
        })
    }

    /// Translates a batch of fields with a fresh import set.
    ///
    /// Failing fields are recorded in the returned run and do not stop it.
    pub fn translate_fields<'f, I>(&self, fields: I) -> TranslationRun
    where
        I: IntoIterator<Item = &'f FieldDeclaration>,
    {
        let mut run = TranslationRun::default();

        for field in fields {
            match self.translate_field(field, &mut run.imports) {
                Ok(translation) => run.fields.push(translation),
                Err(error) => {
                    tracing::warn!(
                        "Skipping field {} (line {}): {}",
                        field.name,
                        field.line,
                        error
                    );
                    run.failures.push(FieldFailure {
                        owner: None,
                        field: field.name.clone(),
                        line: field.line,
                        error,
                    });
                }
            }
        }

        run
    }
}
