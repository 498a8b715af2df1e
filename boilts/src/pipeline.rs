//! Multi-file generation: discovery, parsing, registry barrier and
//! parallel translation.

use anyhow::{Context, Result, bail};
use boilts_codegen::{
    GeneratedModule, Generator, GeneratorOptions, ImportSet, TargetSyntax, Translator,
};
use boilts_schema::{EnumRegistry, ModelFile, parse_model_file};
use rayon::prelude::*;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Extension of Go model sources.
const SOURCE_EXTENSION: &str = "go";

/// Suffix of Go test files, skipped when walking directories.
const TEST_SUFFIX: &str = "_test.go";

/// Extension of generated modules.
const OUTPUT_EXTENSION: &str = "ts";

/// A parsed input file.
#[derive(Debug)]
pub struct SourceUnit {
    /// Path the file was read from.
    pub path: PathBuf,
    /// Parsed model.
    pub file: ModelFile,
}

/// Generated module for one input file.
#[derive(Debug)]
pub struct UnitOutput {
    /// Input path.
    pub path: PathBuf,
    /// Generated module.
    pub module: GeneratedModule,
}

impl UnitOutput {
    /// File name of the generated module: the input stem with `.ts`.
    #[must_use]
    pub fn output_name(&self) -> String {
        let stem = self
            .path
            .file_stem()
            .map_or_else(|| "models".into(), |s| s.to_string_lossy());
        format!("{stem}.{OUTPUT_EXTENSION}")
    }
}

/// Result of a whole run.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    /// Per-file output in input order.
    pub units: Vec<UnitOutput>,
    /// Imports of every unit, merged in input order.
    pub imports: ImportSet,
}

impl PipelineOutput {
    /// Total number of fields skipped across all units.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.units.iter().map(|u| u.module.failures.len()).sum()
    }

    /// Total number of interfaces emitted.
    #[must_use]
    pub fn interface_count(&self) -> usize {
        self.units.iter().map(|u| u.module.interface_count).sum()
    }
}

/// Multi-file generation pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    syntax: TargetSyntax,
    options: GeneratorOptions,
}

impl Pipeline {
    /// Creates a pipeline with the given target names and options.
    #[must_use]
    pub fn new(syntax: TargetSyntax, options: GeneratorOptions) -> Self {
        Self { syntax, options }
    }

    /// Parses every input file. The first parse failure aborts the run.
    ///
    /// # Errors
    /// Returns an error naming the file that could not be read or parsed.
    pub fn load(&self, paths: &[PathBuf]) -> Result<Vec<SourceUnit>> {
        paths
            .iter()
            .map(|path| {
                let file = parse_model_file(path)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                Ok(SourceUnit {
                    path: path.clone(),
                    file,
                })
            })
            .collect()
    }

    /// Builds the enum registry from every loaded unit.
    #[must_use]
    pub fn registry<'a, I>(units: I) -> EnumRegistry
    where
        I: IntoIterator<Item = &'a SourceUnit>,
    {
        units
            .into_iter()
            .fold(EnumRegistry::builder(), |builder, unit| {
                builder.extend_from_model(&unit.file)
            })
            .build()
    }

    /// Generates every unit in parallel against a shared, frozen registry.
    ///
    /// Each unit records imports into its own set; the sets are merged in
    /// input order once all units finish.
    ///
    /// # Errors
    /// In strict mode, returns the first unit's translation failure.
    pub fn generate(&self, units: &[SourceUnit]) -> Result<PipelineOutput> {
        let registry = Self::registry(units);
        tracing::info!(
            "Generating {} files with {} enum types",
            units.len(),
            registry.len()
        );

        let translator = Translator::new(&registry, self.syntax.clone());
        let outputs = units
            .par_iter()
            .map(|unit| {
                let module = Generator::new(&unit.file, &translator)
                    .options(self.options)
                    .generate()
                    .with_context(|| format!("failed to generate {}", unit.path.display()))?;
                Ok(UnitOutput {
                    path: unit.path.clone(),
                    module,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut imports = ImportSet::new();
        for output in &outputs {
            imports.merge(output.module.imports.clone());
        }

        Ok(PipelineOutput {
            units: outputs,
            imports,
        })
    }

    /// Builds a per-field translation report for one unit.
    ///
    /// Every struct field is reported, columns or not. Enum detection uses
    /// `registry`, which should cover every file the unit's types come from.
    #[must_use]
    pub fn inspect(&self, unit: &SourceUnit, registry: &EnumRegistry) -> Value {
        let translator = Translator::new(registry, self.syntax.clone());
        let mut imports = ImportSet::new();

        let structs: Vec<Value> = unit
            .file
            .structs
            .iter()
            .map(|def| {
                let run = translator.translate_fields(&def.fields);
                let failures: Vec<Value> = run.failures.iter().map(failure_report).collect();
                let value = json!({
                    "name": def.name,
                    "line": def.line,
                    "fields": run.fields,
                    "failures": failures,
                });
                imports.merge(run.imports);
                value
            })
            .collect();

        let enums: Vec<&str> = unit.file.string_types().collect();
        json!({
            "path": unit.path.display().to_string(),
            "package": unit.file.package,
            "enums": enums,
            "structs": structs,
            "imports": imports,
        })
    }
}

/// Expands input arguments into source files.
///
/// Arguments with glob characters are matched with `glob`; directories
/// contribute their `.go` files (one level, test files excluded, sorted);
/// other arguments are taken as literal paths.
///
/// # Errors
/// Returns an error for invalid patterns, patterns matching nothing, and
/// unreadable directories.
pub fn discover_inputs<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = Vec::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            let entries =
                glob::glob(pattern).with_context(|| format!("invalid pattern {pattern}"))?;
            for entry in entries {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            let path = PathBuf::from(pattern);
            if path.is_dir() {
                out.extend(sources_in(&path)?);
            } else {
                out.push(path);
            }
        }
    }

    tracing::debug!("Discovered {} input files", out.len());
    Ok(out)
}

fn failure_report(failure: &boilts_codegen::FieldFailure) -> Value {
    json!({
        "field": failure.field,
        "line": failure.line,
        "error": failure.error.to_string(),
    })
}

fn has_glob_chars(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
}

fn sources_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_source = path.extension().is_some_and(|e| e == SOURCE_EXTENSION);
        let is_test = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with(TEST_SUFFIX));
        if path.is_file() && is_source && !is_test {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Writes every unit's module into `out_dir`, creating it if needed.
///
/// # Errors
/// Returns an error if two inputs map to the same output name or if writing
/// fails.
pub fn write_outputs(output: &PipelineOutput, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut seen = HashSet::new();
    let mut written = Vec::with_capacity(output.units.len());

    for unit in &output.units {
        let name = unit.output_name();
        if !seen.insert(name.clone()) {
            bail!(
                "{} would overwrite an earlier {name} in {}",
                unit.path.display(),
                out_dir.display()
            );
        }

        let target = out_dir.join(&name);
        std::fs::write(&target, &unit.module.source)
            .with_context(|| format!("failed to write {}", target.display()))?;
        tracing::info!("Wrote {}", target.display());
        written.push(target);
    }

    Ok(written)
}
