//! # Schema Documents
//!
//! Loading schema and instance documents from disk, and the canonical-schema
//! policy used by the order-intake service.
//!
//! Documents are JSON by default; `.yaml`/`.yml` files are parsed as YAML and
//! converted to the equivalent JSON value.
//!
//! ## Canonical schema fallback
//!
//! A missing or unparsable canonical schema is replaced by
//! [`fallback_schema`] (`{"type": "object"}`), which accepts any JSON object.
//! This is fail-open: orders are then only checked for being objects.
//! [`CanonicalSchema::load`] logs a warning and records the reason in
//! [`SchemaOrigin::Fallback`]; [`CanonicalSchema::load_required`] refuses to
//! fall back. A document that parses but does not compile is always an error.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::validate::{CompiledValidator, SchemaError, Verdict};

/// Schema used when the canonical schema cannot be loaded.
pub fn fallback_schema() -> Value {
    json!({ "type": "object" })
}

/// Read a JSON or YAML document, choosing the parser by file extension.
///
/// # Errors
///
/// Returns [`SchemaError::Load`] if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    let load_err = |reason: String| SchemaError::Load {
        path: path.display().to_string(),
        reason,
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| load_err(format!("cannot read file: {e}")))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| load_err(format!("invalid YAML: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_err(format!("invalid JSON: {e}"))),
    }
}

/// Read and compile a schema file.
pub fn compile_file(path: &Path) -> Result<CompiledValidator, SchemaError> {
    CompiledValidator::compile(&load_document(path)?)
}

/// Where the canonical schema in effect came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOrigin {
    /// Loaded from this file.
    File(PathBuf),
    /// The file could not be loaded; [`fallback_schema`] is in effect.
    Fallback {
        /// Path that was attempted.
        path: PathBuf,
        /// Why it could not be loaded.
        reason: String,
    },
}

impl fmt::Display for SchemaOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Fallback { path, .. } => write!(f, "fallback (could not load {})", path.display()),
        }
    }
}

/// The single schema every incoming order is validated against.
#[derive(Debug)]
pub struct CanonicalSchema {
    validator: CompiledValidator,
    origin: SchemaOrigin,
}

impl CanonicalSchema {
    /// Load the canonical schema, falling back to [`fallback_schema`] if the
    /// file is missing or unparsable.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the file parses but is not a valid
    /// schema. Load failures never error here.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        match load_document(path) {
            Ok(schema) => Self::from_file_value(path, &schema),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "canonical schema unavailable; accepting any JSON object"
                );
                Ok(Self {
                    validator: CompiledValidator::compile(&fallback_schema())?,
                    origin: SchemaOrigin::Fallback {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    },
                })
            }
        }
    }

    /// Load the canonical schema without the fallback.
    pub fn load_required(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let schema = load_document(path)?;
        Self::from_file_value(path, &schema)
    }

    /// Use an in-memory schema document.
    pub fn from_value(schema: &Value) -> Result<Self, SchemaError> {
        Ok(Self {
            validator: CompiledValidator::compile(schema)?,
            origin: SchemaOrigin::File(PathBuf::new()),
        })
    }

    fn from_file_value(path: &Path, schema: &Value) -> Result<Self, SchemaError> {
        let validator = CompiledValidator::compile(schema)?;
        tracing::info!(path = %path.display(), "loaded canonical schema");
        Ok(Self {
            validator,
            origin: SchemaOrigin::File(path.to_path_buf()),
        })
    }

    pub fn validate(&self, instance: &Value) -> Verdict {
        self.validator.validate(instance)
    }

    pub fn validator(&self) -> &CompiledValidator {
        &self.validator
    }

    pub fn origin(&self) -> &SchemaOrigin {
        &self.origin
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, SchemaOrigin::Fallback { .. })
    }
}
