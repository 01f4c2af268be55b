//! # apilab-cli — Schema Grading Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate` — check instance documents against a schema, one verdict per instance
//! - `check-schema` — compile a schema without validating anything
//!
//! ## Exit Codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | every instance valid / schema compiles   |
//! | 1    | some instance invalid / schema rejected  |
//! | 2    | a file could not be read or parsed       |
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers write to a caller-supplied writer so they can be tested without
//!   capturing stdout.

pub mod validate;
