//! # Validate Subcommands
//!
//! `apilab validate --schema <SCHEMA> <INSTANCE>...` compiles the schema once
//! and prints one JSON verdict per instance:
//!
//! ```text
//! {"instance":"order.json","valid":false,"errors":[{"path":"","message":"...","keyword":"required","schemaPath":"/required"}]}
//! ```
//!
//! `apilab check-schema <SCHEMA>` only compiles.
//!
//! Schema and instance files may be JSON or YAML (`.yaml`/`.yml`).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use apilab_schema::{compile_file, load_document, CompiledValidator, SchemaError, Verdict};

/// Arguments for the `apilab validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema every instance is validated against.
    #[arg(long, short, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Instance documents to validate.
    #[arg(value_name = "INSTANCE", required = true)]
    pub instances: Vec<PathBuf>,

    /// Pretty-print each verdict instead of one line per instance.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `apilab check-schema` subcommand.
#[derive(Args, Debug)]
pub struct CheckSchemaArgs {
    /// Schema document to compile.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// One line of `validate` output.
#[derive(Debug, Serialize)]
struct InstanceReport<'a> {
    instance: String,
    #[serde(flatten)]
    verdict: &'a Verdict,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every instance is valid, 1 when any is invalid.
/// Unreadable files and schemas that do not compile are errors.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<u8> {
    let validator = compile_schema(&args.schema)?;
    tracing::info!(schema = %args.schema.display(), "compiled schema");

    let mut invalid = 0usize;
    for path in &args.instances {
        let verdict = validate_instance(&validator, path)?;
        if !verdict.is_valid() {
            invalid += 1;
            tracing::info!(instance = %path.display(), errors = verdict.errors().len(), "instance invalid");
        }

        let report = InstanceReport {
            instance: path.display().to_string(),
            verdict: &verdict,
        };
        let line = if args.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        writeln!(out, "{line}")?;
    }

    tracing::debug!(total = args.instances.len(), invalid, "validation finished");
    Ok(u8::from(invalid > 0))
}

/// Execute the check-schema subcommand.
///
/// Returns exit code: 0 if the schema compiles, 1 if it is not a valid schema.
/// A file that cannot be read or parsed is an error.
pub fn run_check_schema(args: &CheckSchemaArgs, out: &mut impl Write) -> Result<u8> {
    match compile_file(&args.schema) {
        Ok(_) => {
            writeln!(out, "OK: {}", args.schema.display())?;
            Ok(0)
        }
        Err(SchemaError::Compile { reason }) => {
            writeln!(out, "INVALID: {}: {reason}", args.schema.display())?;
            Ok(1)
        }
        Err(e @ SchemaError::Load { .. }) => Err(e.into()),
    }
}

fn compile_schema(path: &Path) -> Result<CompiledValidator> {
    compile_file(path).with_context(|| format!("cannot use schema {}", path.display()))
}

fn validate_instance(validator: &CompiledValidator, path: &Path) -> Result<Verdict> {
    let instance = load_document(path)
        .with_context(|| format!("cannot load instance {}", path.display()))?;
    Ok(validator.validate(&instance))
}
