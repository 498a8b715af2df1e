//! # boilts Codegen
//!
//! Type resolution and TypeScript generation from SQLBoiler models.
//!
//! This crate provides:
//! - Recursive resolution of field type expressions into descriptors
//! - Normalization of database-specific aliases, with import tracking
//! - Mapping of canonical names into TypeScript type syntax
//! - Interface generation for whole model files

pub mod error;
pub mod generator;
pub mod imports;
pub mod normalizer;
pub mod resolver;
pub mod translate;
pub mod typescript;

pub use error::CodegenError;
pub use generator::{GeneratedModule, Generator, GeneratorOptions};
pub use imports::ImportSet;
pub use normalizer::normalize;
pub use resolver::{TypeDescriptor, TypeResolver};
pub use translate::{FieldFailure, FieldTranslation, TranslationRun, Translator};
pub use typescript::{TargetMapper, TargetSyntax};

use boilts_schema::EnumRegistry;

/// Generates TypeScript interfaces from a Go model source string.
///
/// The enum registry is built from the string types declared in the same
/// source; use [`Generator`] directly to share a registry across files.
///
/// # Arguments
/// * `src` - Go model source
///
/// # Returns
/// Generated TypeScript code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing fails.
pub fn generate_from_source(src: &str) -> Result<String, CodegenError> {
    let file = boilts_schema::parse_model_source(src)?;
    let registry = EnumRegistry::builder().extend_from_model(&file).build();
    let translator = Translator::new(&registry, TargetSyntax::default());
    let module = Generator::new(&file, &translator).generate()?;
    Ok(module.source)
}

/// Generates TypeScript interfaces from a Go model source file.
///
/// # Errors
/// Returns `CodegenError` if reading or parsing fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<String, CodegenError> {
    let src = std::fs::read_to_string(path)?;
    generate_from_source(&src)
}
