//! # boilts Schema
//!
//! Source-side model of SQLBoiler-generated Go files.
//!
//! This crate provides:
//! - Type expressions and field declarations as produced by the structural parser
//! - A structural parser for Go model sources
//! - Tag inspection (`boil:"..."` mapped names)
//! - The enum-name registry queried during type resolution

pub mod error;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod tags;
pub mod types;

pub use error::ParseError;
pub use parser::{parse_model_file, parse_model_source};
pub use registry::{EnumRegistry, EnumRegistryBuilder};
pub use tags::{TagReport, TagWarning, extract_mapped_name, has_tag, inspect_tag};
pub use types::{FieldDeclaration, ModelFile, StructDef, TypeAlias, TypeExpression};
