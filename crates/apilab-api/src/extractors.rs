//! # Body Extraction
//!
//! Handlers take `Result<Json<T>, JsonRejection>` so a malformed body becomes
//! a structured rejection instead of axum's plain-text default.

use axum::extract::rejection::JsonRejection;
use axum::Json;

/// Unwrap a JSON body, keeping the rejection reason as text.
pub fn json_body<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, String> {
    result.map(|Json(v)| v).map_err(|err| err.body_text())
}

