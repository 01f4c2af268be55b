//! # apilab-schema — Schema Validation
//!
//! The validation contract shared by the grading helper and the order-intake
//! service: compile a JSON Schema document once, validate any number of
//! instances against it, and get back a [`Verdict`] listing every violation.
//!
//! ## Validation (`validate`)
//!
//! - [`CompiledValidator::compile`] — fails fast with [`SchemaError`] when the
//!   schema document itself is malformed.
//! - [`CompiledValidator::validate`] — pure, never fails; an invalid instance
//!   is a verdict with errors.
//! - [`validate_schema`] — compile + validate in one call.
//!
//! ## Documents (`document`)
//!
//! JSON/YAML loading and the [`CanonicalSchema`] used by the order-intake
//! service, including its fail-open fallback.
//!
//! ## Crate Policy
//!
//! - No HTTP, storage, or authentication concerns.
//! - No `.unwrap()` outside tests.

pub mod document;
pub mod validate;

pub use document::{compile_file, fallback_schema, load_document, CanonicalSchema, SchemaOrigin};
pub use validate::{validate_schema, CompiledValidator, SchemaError, ValidationError, Verdict};
