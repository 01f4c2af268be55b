//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from apilab-core to HTTP status codes with a JSON
//! body carrying a machine-readable code, a message, and optional details.
//! Internal error details are never returned to clients.
//!
//! Order intake rejections do not use this type: they have their own
//! `{status: "rejected", errors: [...]}` body (see `routes::downstream`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use apilab_core::CategoryError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "UNAUTHORIZED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context, present only for some client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// No catalog entry for the requested product (404).
    #[error("Product not found")]
    ProductNotFound(String),

    /// Malformed request or unknown order category (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or incorrect API key (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::ProductNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::ProductNotFound(product_id) => {
                Some(serde_json::json!({ "productId": product_id }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// An unknown order category is a client error.
impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::ProductNotFound("P9".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "for {err}");
        }
    }

    #[test]
    fn category_error_converts_to_bad_request() {
        let err = AppError::from("bogus".parse::<apilab_core::OrderCategory>().unwrap_err());
        match &err {
            AppError::BadRequest(msg) => assert_eq!(msg, "Invalid order type: bogus"),
            other => panic!("expected BadRequest, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn product_not_found_carries_product_id() {
        let (status, body) = response_parts(AppError::ProductNotFound("P404".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.message, "Product not found");
        assert_eq!(body.error.details.unwrap()["productId"], "P404");
    }

    #[tokio::test]
    async fn bad_request_has_no_details() {
        let (status, body) = response_parts(AppError::BadRequest("Invalid order type: x".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.message.contains("Invalid order type: x"));
        assert!(body.error.details.is_none());
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let (status, body) = response_parts(AppError::Internal("lock poisoned".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(!body.error.message.contains("lock"));
    }

    #[tokio::test]
    async fn unauthorized_body_omits_details() {
        let response = AppError::Unauthorized("Invalid API key".into()).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(json.contains("UNAUTHORIZED"));
        assert!(!json.contains("details"));
    }
}
