//! Module generation from a parsed model file.

use crate::error::CodegenError;
use crate::imports::ImportSet;
use crate::translate::{FieldFailure, Translator};
use crate::typescript::{InterfaceDef, InterfaceGenerator};
use boilts_schema::tags::BOIL_PREFIX;
use boilts_schema::{FieldDeclaration, ModelFile, extract_mapped_name, has_tag};

/// Mapped name SQLBoiler uses for fields that are not columns.
const SKIPPED_COLUMN: &str = "-";

/// Generation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Abort on the first field that cannot be translated.
    pub strict: bool,
}

/// Generated module with the run's side outputs.
#[derive(Debug, Default)]
pub struct GeneratedModule {
    /// Generated TypeScript source.
    pub source: String,
    /// Number of interfaces emitted.
    pub interface_count: usize,
    /// Imports recorded while translating.
    pub imports: ImportSet,
    /// Fields skipped because they could not be translated.
    pub failures: Vec<FieldFailure>,
}

/// Generator for one model file.
pub struct Generator<'a> {
    file: &'a ModelFile,
    translator: &'a Translator<'a>,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default options.
    #[must_use]
    pub fn new(file: &'a ModelFile, translator: &'a Translator<'a>) -> Self {
        Self {
            file,
            translator,
            options: GeneratorOptions::default(),
        }
    }

    /// Sets the generation options.
    #[must_use]
    pub fn options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Translates every column field and renders the module.
    ///
    /// # Errors
    /// In strict mode, returns the first `CodegenError::UnsupportedField`.
    pub fn generate(&self) -> Result<GeneratedModule, CodegenError> {
        let mut imports = ImportSet::new();
        let mut failures = Vec::new();
        let mut interfaces = Vec::new();

        for def in &self.file.structs {
            let mut members = Vec::new();

            for field in def.fields.iter().filter(|f| is_column(f)) {
                match self.translator.translate_field(field, &mut imports) {
                    Ok(translation) => members.push(translation),
                    Err(error) if self.options.strict => return Err(error),
                    Err(error) => {
                        tracing::warn!(
                            "Skipping {}.{} (line {}): {}",
                            def.name,
                            field.name,
                            field.line,
                            error
                        );
                        failures.push(FieldFailure {
                            owner: Some(def.name.clone()),
                            field: field.name.clone(),
                            line: field.line,
                            error,
                        });
                    }
                }
            }

            if !members.is_empty() {
                interfaces.push(InterfaceDef {
                    name: def.name.clone(),
                    members,
                });
            }
        }

        let source = InterfaceGenerator::new(&interfaces).generate();
        tracing::info!(
            "Generated {} interfaces for package {}",
            interfaces.len(),
            self.file.package
        );

        Ok(GeneratedModule {
            source,
            interface_count: interfaces.len(),
            imports,
            failures,
        })
    }
}

/// Returns true for fields mapped to a database column.
fn is_column(field: &FieldDeclaration) -> bool {
    match extract_mapped_name(field) {
        Some(name) => has_tag(field, BOIL_PREFIX) && !name.is_empty() && name != SKIPPED_COLUMN,
        None => false,
    }
}
