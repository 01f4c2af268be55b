//! # Schema Validation
//!
//! Compile-once, validate-many JSON Schema checking.
//!
//! A schema document is compiled into a [`CompiledValidator`] exactly once.
//! Every call to [`CompiledValidator::validate`] walks the whole instance and
//! reports every violation it finds as a [`ValidationError`], wrapped in a
//! [`Verdict`]. Validation never fails: a malformed instance is a verdict
//! with errors, not an `Err`.
//!
//! ## Strictness
//!
//! One policy applies to every caller:
//!
//! - Recognized keywords are strict. The schema is checked against the draft
//!   meta-schema at compile time, so `"type": "strng"` or `"required": "id"`
//!   is a [`SchemaError`], and `format` is asserted, not just annotated.
//! - Unknown keywords and unknown format names are ignored.
//!
//! ## Drafts
//!
//! A schema that declares `$schema` is compiled under that draft; one that
//! does not is compiled under [`DEFAULT_DRAFT`].

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Draft used when the schema does not declare one.
pub const DEFAULT_DRAFT: Draft = Draft::Draft7;

/// Keyword reported when the failing location cannot be attributed to one.
const UNKNOWN_KEYWORD: &str = "schema";

/// Keyword reported when a boolean `false` subschema rejects a value.
const FALSE_SCHEMA_KEYWORD: &str = "false schema";

/// Keywords whose value is a map of named subschemas (or, for
/// `dependentRequired`, of property lists). The segment after one of these
/// in a schema path is a name, never a keyword.
const NAMED_SUBSCHEMA_KEYWORDS: &[&str] = &[
    "properties",
    "patternProperties",
    "definitions",
    "$defs",
    "dependencies",
    "dependentSchemas",
    "dependentRequired",
];

/// Error raised for the schema document itself, never for an instance.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The document is valid JSON but not a valid JSON Schema.
    #[error("schema compile error: {reason}")]
    Compile {
        /// Reason reported by the schema compiler.
        reason: String,
    },

    /// The schema file could not be read or parsed.
    #[error("schema load error for '{path}': {reason}")]
    Load {
        /// Path of the schema file.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },
}

/// A single constraint violation found in an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// JSON Pointer to the offending location in the instance (`""` is the root).
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// The schema keyword that failed, e.g. `required` or `type`.
    pub keyword: String,
    /// JSON Pointer to the failing keyword inside the schema.
    pub schema_path: String,
}

impl ValidationError {
    fn from_jsonschema(err: &jsonschema::ValidationError<'_>) -> Self {
        let schema_path = err.schema_path.to_string();
        let keyword = match err.kind {
            ValidationErrorKind::FalseSchema { .. } => FALSE_SCHEMA_KEYWORD.to_string(),
            _ => keyword_from_schema_path(&schema_path),
        };
        Self {
            path: err.instance_path.to_string(),
            message: err.to_string(),
            keyword,
            schema_path,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root) [{}]: {}", self.keyword, self.message)
        } else {
            write!(f, "{} [{}]: {}", self.path, self.keyword, self.message)
        }
    }
}

/// Outcome of validating one instance.
///
/// Only constructible from its error list, so `valid` is always exactly
/// `errors.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    valid: bool,
    errors: Vec<ValidationError>,
}

impl Verdict {
    /// Build a verdict from the collected violations.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// A passing verdict.
    pub fn pass() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return write!(f, "valid");
        }
        write!(f, "invalid ({} error(s))", self.errors.len())?;
        for err in &self.errors {
            write!(f, "\n  {err}")?;
        }
        Ok(())
    }
}

/// A schema compiled once and reusable across any number of instances.
///
/// `Send + Sync`: one compiled validator can be shared by every request handler.
pub struct CompiledValidator {
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for CompiledValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl CompiledValidator {
    /// Compile a schema document, under its declared `$schema` draft or
    /// [`DEFAULT_DRAFT`] when it declares none.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the document does not satisfy the
    /// draft meta-schema or references something that cannot be resolved.
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        let built = if declares_draft(schema) {
            jsonschema::options()
                .should_validate_formats(true)
                .should_ignore_unknown_formats(true)
                .build(schema)
        } else {
            jsonschema::options()
                .with_draft(DEFAULT_DRAFT)
                .should_validate_formats(true)
                .should_ignore_unknown_formats(true)
                .build(schema)
        };
        let validator = built.map_err(|e| SchemaError::Compile {
            reason: e.to_string(),
        })?;

        Ok(Self {
            schema: schema.clone(),
            validator,
        })
    }

    /// Validate an instance, collecting every violation in one pass.
    pub fn validate(&self, instance: &Value) -> Verdict {
        let errors = self
            .validator
            .iter_errors(instance)
            .map(|e| ValidationError::from_jsonschema(&e))
            .collect();
        Verdict::from_errors(errors)
    }

    /// Pass/fail only, without building error records.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// The schema document this validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }
}

/// Compile `schema` and validate `instance` against it.
///
/// One-shot form for callers that validate a single document, such as the
/// grading helper. Callers validating many documents should compile once.
pub fn validate_schema(instance: &Value, schema: &Value) -> Result<Verdict, SchemaError> {
    Ok(CompiledValidator::compile(schema)?.validate(instance))
}

fn declares_draft(schema: &Value) -> bool {
    schema.get("$schema").is_some()
}

/// The keyword is the last segment of the schema path in keyword position.
/// Array indices and the names under `properties`-like keywords are skipped:
/// `/properties/amount/type` -> `type`, `/items/0/required` -> `required`,
/// `/properties/type` -> `properties`.
fn keyword_from_schema_path(schema_path: &str) -> String {
    let mut keyword = None;
    let mut segments = schema_path.split('/').filter(|seg| !seg.is_empty());
    while let Some(seg) = segments.next() {
        if seg.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let seg = seg.replace("~1", "/").replace("~0", "~");
        if NAMED_SUBSCHEMA_KEYWORDS.contains(&seg.as_str()) {
            segments.next();
        }
        keyword = Some(seg);
    }
    keyword.unwrap_or_else(|| UNKNOWN_KEYWORD.to_string())
}
