//! Prelude module for convenient imports.
//!
//! ```ignore
//! use boilts::prelude::*;
//! ```

// Schema types
pub use boilts_schema::{
    EnumRegistry, EnumRegistryBuilder, FieldDeclaration, ModelFile, ParseError, StructDef,
    TagWarning, TypeExpression, parse_model_file, parse_model_source,
};

// Codegen types
pub use boilts_codegen::{
    CodegenError, FieldTranslation, GeneratedModule, Generator, GeneratorOptions, ImportSet,
    TargetMapper, TargetSyntax, Translator, TypeDescriptor, TypeResolver,
};

// Pipeline
pub use crate::pipeline::{Pipeline, PipelineOutput, SourceUnit};
