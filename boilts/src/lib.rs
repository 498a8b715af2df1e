//! # boilts
//!
//! Generate TypeScript interfaces from SQLBoiler Go models.
//!
//! boilts reads the Go model files SQLBoiler generates, resolves every column
//! field's type (pointers, package-qualified names, nullable wrappers and
//! database aliases) and renders the result as TypeScript interfaces.
//!
//! ## Quick Start
//!
//! ```ignore
//! use boilts::prelude::*;
//!
//! let file = parse_model_source(source)?;
//! let registry = EnumRegistry::builder().extend_from_model(&file).build();
//! let translator = Translator::new(&registry, TargetSyntax::default());
//! let module = Generator::new(&file, &translator).generate()?;
//! println!("{}", module.source);
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Go model parsing, tags and the enum registry
//! - [`codegen`] - Type resolution, normalization and TypeScript output
//! - [`pipeline`] - Multi-file discovery and parallel generation
//! - [`cli`] - Command-line arguments for the `boilts` binary
//! - [`logging`] - Subscriber setup for the binary

pub mod cli;
pub mod logging;
pub mod pipeline;
pub mod prelude;

/// Go model parsing, tags and the enum registry.
pub mod schema {
    pub use boilts_schema::*;
}

/// Type resolution and TypeScript generation.
pub mod codegen {
    pub use boilts_codegen::*;
}

// Re-export commonly used items at the crate root
pub use boilts_codegen::{
    CodegenError, GeneratedModule, Generator, GeneratorOptions, TargetSyntax, Translator,
};
pub use boilts_schema::{EnumRegistry, ModelFile, ParseError};
