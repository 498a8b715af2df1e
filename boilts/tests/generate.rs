//! End-to-end generation over model directories.

use boilts::cli::{self, Cli};
use boilts::pipeline::{Pipeline, discover_inputs, write_outputs};
use clap::Parser;
use std::fs;
use std::path::Path;

const USERS: &str = r#"package models

import (
	"time"

	"github.com/volatiletech/null/v8"
	"github.com/volatiletech/sqlboiler/v4/types"
)

// User is an object representing the database table.
type User struct {
	ID        int               `boil:"id" json:"id" toml:"id" yaml:"id"`
	Email     string            `boil:"email" json:"email" toml:"email" yaml:"email"`
	Role      UserRole          `boil:"role" json:"role" toml:"role" yaml:"role"`
	Nickname  null.String       `boil:"nickname" json:"nickname,omitempty" toml:"nickname" yaml:"nickname,omitempty"`
	Balance   types.Decimal     `boil:"balance" json:"balance" toml:"balance" yaml:"balance"`
	Scores    types.Int64Array  `boil:"scores" json:"scores,omitempty" toml:"scores" yaml:"scores,omitempty"`
	Active    null.Bool         `boil:"active" json:"active,omitempty" toml:"active" yaml:"active,omitempty"`
	CreatedAt null.Time         `boil:"created_at" json:"created_at,omitempty" toml:"created_at" yaml:"created_at,omitempty"`

	R *userR `boil:"-" json:"-" toml:"-" yaml:"-"`
	L userL  `boil:"-" json:"-" toml:"-" yaml:"-"`
}

type userR struct {
	Posts PostSlice `boil:"Posts" json:"Posts" toml:"Posts" yaml:"Posts"`
}

type userL struct{}

// UserSlice is an alias for a slice of pointers to User.
type UserSlice []*User

func (o *User) Reload(ctx context.Context, exec boil.ContextExecutor) error {
	if o == nil {
		return nil
	}
	return nil
}
"#;

const ENUMS: &str = r#"package models

type UserRole string

const (
	UserRoleAdmin  UserRole = "admin"
	UserRoleMember UserRole = "member"
)
"#;

const BLOBS: &str = r#"package models

type Blob struct {
	ID   int    `boil:"id" json:"id"`
	Data []byte `boil:"data" json:"data"`
}
"#;

fn write_models(dir: &Path) {
    fs::write(dir.join("users.go"), USERS).expect("write users");
    fs::write(dir.join("enums.go"), ENUMS).expect("write enums");
    fs::write(dir.join("users_test.go"), "package models\n").expect("write test file");
    fs::write(dir.join("README.md"), "not a model").expect("write readme");
}

#[test]
fn test_discover_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_models(dir.path());

    let inputs = discover_inputs([dir.path().to_string_lossy()]).expect("discover");
    let names: Vec<_> = inputs
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["enums.go", "users.go"]);
}

#[test]
fn test_discover_glob_without_matches() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pattern = format!("{}/*.go", dir.path().display());

    let err = discover_inputs([pattern]).unwrap_err();
    assert!(err.to_string().contains("matched no files"));
}

#[test]
fn test_discover_glob_sorted() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_models(dir.path());
    let pattern = format!("{}/*.go", dir.path().display());

    let inputs = discover_inputs([pattern]).expect("discover");
    let names: Vec<_> = inputs
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["enums.go", "users.go", "users_test.go"]);
}

#[test]
fn test_generate_model_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_models(dir.path());

    let pipeline = Pipeline::default();
    let inputs = discover_inputs([dir.path().to_string_lossy()]).expect("discover");
    let units = pipeline.load(&inputs).expect("load");
    let output = pipeline.generate(&units).expect("generate");

    let users = &output.units[1].module;
    assert_eq!(
        users.source,
        "// Code generated by boilts. DO NOT EDIT.\n\
         \n\
         export type UserRole = string;\n\
         \n\
         export interface User {\n\
         \x20 id: number;\n\
         \x20 email: string;\n\
         \x20 role: UserRole;\n\
         \x20 nickname: string;\n\
         \x20 balance: number;\n\
         \x20 scores: number[];\n\
         \x20 active: boolean;\n\
         \x20 created_at: Date;\n\
         }\n\
         \n\
         export interface userR {\n\
         \x20 Posts: Post[];\n\
         }\n"
    );
    assert_eq!(output.failure_count(), 0);
    assert!(output.imports.is_empty());
}

#[test]
fn test_write_outputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_models(dir.path());
    let out_dir = dir.path().join("web").join("models");

    let pipeline = Pipeline::default();
    let inputs = discover_inputs([dir.path().to_string_lossy()]).expect("discover");
    let units = pipeline.load(&inputs).expect("load");
    let output = pipeline.generate(&units).expect("generate");
    let written = write_outputs(&output, &out_dir).expect("write");

    let expected = vec![out_dir.join("enums.ts"), out_dir.join("users.ts")];
    assert_eq!(written, expected);
    let users = fs::read_to_string(out_dir.join("users.ts")).expect("read");
    assert!(users.contains("created_at: Date;"));
}

#[test]
fn test_write_outputs_same_stem_collision() {
    let dir = tempfile::tempdir().expect("tempdir");
    for sub in ["dir_a", "dir_b"] {
        let models = dir.path().join(sub);
        fs::create_dir(&models).expect("mkdir");
        fs::write(models.join("users.go"), USERS).expect("write users");
    }
    let out_dir = dir.path().join("web");

    let pipeline = Pipeline::default();
    let dirs = [dir.path().join("dir_a"), dir.path().join("dir_b")];
    let inputs = discover_inputs(dirs.iter().map(|d| d.to_string_lossy())).expect("discover");
    let units = pipeline.load(&inputs).expect("load");
    let output = pipeline.generate(&units).expect("generate");
    let err = write_outputs(&output, &out_dir).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("would overwrite an earlier users.ts"));
    assert!(message.contains("dir_b"));
}

#[test]
fn test_parse_failure_names_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let broken = dir.path().join("broken.go");
    fs::write(&broken, "package models\ntype Broken struct {\n\tID int\n").expect("write");

    let err = Pipeline::default().load(&[broken]).unwrap_err();
    assert!(format!("{err:#}").contains("broken.go"));
}

#[test]
fn test_cli_generate_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("blobs.go");
    fs::write(&path, BLOBS).expect("write");

    let input = path.to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "boilts",
        "generate",
        "--input",
        input.as_str(),
        "--numeric",
        "bigint",
    ])
    .expect("Failed to parse");
    let mut out = Vec::new();
    cli::run(&cli, &mut out).expect("run");

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("export interface Blob {\n  id: bigint;\n}\n"));
    assert!(!text.contains("data"));
}

#[test]
fn test_cli_generate_strict_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("blobs.go");
    fs::write(&path, BLOBS).expect("write");

    let input = path.to_string_lossy().into_owned();
    let cli = Cli::try_parse_from(["boilts", "generate", "-i", input.as_str(), "--strict"])
        .expect("Failed to parse");
    let err = cli::run(&cli, &mut Vec::new()).unwrap_err();

    assert!(format!("{err:#}").contains("[]byte"));
}

#[test]
fn test_cli_inspect() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("blobs.go");
    fs::write(&path, BLOBS).expect("write");

    let input = path.to_string_lossy().into_owned();
    let cli = Cli::try_parse_from(["boilts", "inspect", "--input", input.as_str()])
        .expect("Failed to parse");
    let mut out = Vec::new();
    cli::run(&cli, &mut out).expect("run");

    let report: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(report["package"], "models");
    assert_eq!(report["structs"][0]["fields"][0]["mapped_name"], "id");
    assert_eq!(report["structs"][0]["failures"][0]["field"], "Data");
}

#[test]
fn test_cli_inspect_with_enum_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_models(dir.path());

    let users = dir.path().join("users.go").to_string_lossy().into_owned();
    let models = dir.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "boilts",
        "inspect",
        "-i",
        users.as_str(),
        "--enums",
        models.as_str(),
    ])
    .expect("Failed to parse");
    let mut out = Vec::new();
    cli::run(&cli, &mut out).expect("run");

    let report: serde_json::Value = serde_json::from_slice(&out).expect("json");
    let role = &report["structs"][0]["fields"][2];
    assert_eq!(role["field_name"], "Role");
    assert_eq!(role["descriptor"]["is_enum"], true);
    assert_eq!(role["target_type"], "UserRole");
}
