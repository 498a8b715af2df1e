//! Command-line arguments for the `boilts` binary.

use crate::pipeline::{self, Pipeline, SourceUnit};
use anyhow::{Context, Result};
use boilts_codegen::{GeneratorOptions, TargetSyntax};
use boilts_schema::parse_model_file;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Generate TypeScript interfaces from SQLBoiler Go models
#[derive(Parser, Debug)]
#[command(name = "boilts", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate TypeScript modules from model files
    Generate(GenerateArgs),
    /// Print the per-field translation report of one model file as JSON
    Inspect(InspectArgs),
}

/// Arguments of `boilts generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Model files, directories or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    pub input: Vec<String>,

    /// Directory for the generated `.ts` files (stdout if omitted)
    #[arg(long, short)]
    pub out_dir: Option<PathBuf>,

    /// Fail on the first field whose type cannot be translated
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    #[command(flatten)]
    pub syntax: SyntaxArgs,
}

impl GenerateArgs {
    /// Generator options selected by the flags.
    #[must_use]
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            strict: self.strict,
        }
    }
}

/// Arguments of `boilts inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Model file to inspect
    #[arg(long, short)]
    pub input: PathBuf,

    /// Other model files, directories or quoted glob patterns whose string
    /// types count as enums
    #[arg(long, short, num_args = 1..)]
    pub enums: Vec<String>,

    #[command(flatten)]
    pub syntax: SyntaxArgs,
}

/// Target type names.
#[derive(Args, Debug, Clone)]
pub struct SyntaxArgs {
    /// Type used for every integer and floating-point value
    #[arg(long, default_value = "number")]
    pub numeric: String,

    /// Type used for booleans
    #[arg(long, default_value = "boolean")]
    pub boolean: String,

    /// Type used for timestamps
    #[arg(long, default_value = "Date")]
    pub date: String,
}

impl SyntaxArgs {
    /// Converts the flags into target syntax.
    #[must_use]
    pub fn to_target_syntax(&self) -> TargetSyntax {
        TargetSyntax {
            numeric: self.numeric.clone(),
            boolean: self.boolean.clone(),
            date: self.date.clone(),
            ..TargetSyntax::default()
        }
    }
}

/// Runs a parsed command, writing any stdout output to `out`.
///
/// # Errors
/// Returns an error if discovery, parsing, strict generation or writing fails.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    match &cli.command {
        Command::Generate(args) => generate(args, out),
        Command::Inspect(args) => inspect(args, out),
    }
}

fn generate<W: Write>(args: &GenerateArgs, out: &mut W) -> Result<()> {
    let pipeline = Pipeline::new(args.syntax.to_target_syntax(), args.options());
    let paths = pipeline::discover_inputs(&args.input)?;
    let units = pipeline.load(&paths)?;
    let output = pipeline.generate(&units)?;
    tracing::debug!("Imports recorded: {:?}", output.imports.as_slice());

    if output.failure_count() > 0 {
        tracing::warn!(
            "{} fields skipped; run with --strict to fail instead",
            output.failure_count()
        );
    }

    match &args.out_dir {
        Some(dir) => {
            let written = pipeline::write_outputs(&output, dir)?;
            tracing::info!(
                "Wrote {} modules with {} interfaces",
                written.len(),
                output.interface_count()
            );
        }
        None => {
            for (i, unit) in output.units.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", unit.module.source)?;
            }
        }
    }

    Ok(())
}

fn inspect<W: Write>(args: &InspectArgs, out: &mut W) -> Result<()> {
    let file = parse_model_file(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    let unit = SourceUnit {
        path: args.input.clone(),
        file,
    };
    let pipeline = Pipeline::new(args.syntax.to_target_syntax(), GeneratorOptions::default());

    let paths: Vec<PathBuf> = pipeline::discover_inputs(&args.enums)?
        .into_iter()
        .filter(|path| *path != unit.path)
        .collect();
    let others = pipeline.load(&paths)?;
    let registry = Pipeline::registry(std::iter::once(&unit).chain(&others));
    let report = pipeline.inspect(&unit, &registry);

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "boilts",
            "-vv",
            "generate",
            "--input",
            "models/*.go",
            "extra.go",
            "--out-dir",
            "web",
            "--strict",
            "--date",
            "string",
        ])
        .expect("Failed to parse");

        assert_eq!(cli.verbose, 2);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.input, vec!["models/*.go", "extra.go"]);
        assert_eq!(args.out_dir, Some(PathBuf::from("web")));
        assert!(args.options().strict);

        let syntax = args.syntax.to_target_syntax();
        assert_eq!(syntax.date, "string");
        assert_eq!(syntax.numeric, "number");
        assert_eq!(syntax.collection, "[]");
    }

    #[test]
    fn test_parse_inspect() {
        let cli = Cli::try_parse_from(["boilts", "inspect", "-i", "users.go"])
            .expect("Failed to parse");

        assert_eq!(cli.verbose, 0);
        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.input, PathBuf::from("users.go"));
        assert!(args.enums.is_empty());
    }

    #[test]
    fn test_parse_inspect_with_enums() {
        let cli = Cli::try_parse_from([
            "boilts",
            "inspect",
            "-i",
            "models/users.go",
            "--enums",
            "models/enums.go",
            "shared/",
        ])
        .expect("Failed to parse");

        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.enums, vec!["models/enums.go", "shared/"]);
    }

    #[test]
    fn test_generate_requires_input() {
        assert!(Cli::try_parse_from(["boilts", "generate"]).is_err());
    }
}
