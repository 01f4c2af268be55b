//! # API Key Middleware
//!
//! Shared-secret authentication for the pricing service. Every request
//! routed through [`api_key_middleware`] must carry an `X-API-Key` header
//! equal to the configured key. Health probes are mounted outside the
//! middleware and stay unauthenticated.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The expected API key, injected into request extensions.
///
/// Custom `Debug` redacts the key to keep it out of logs.
#[derive(Clone)]
pub struct ApiKeyConfig {
    key: String,
}

impl ApiKeyConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Constant-time comparison against the configured key.
    pub fn matches(&self, provided: &str) -> bool {
        let provided = provided.as_bytes();
        let expected = self.key.as_bytes();
        if provided.len() != expected.len() {
            // Keep timing independent of where the lengths diverge.
            let _ = expected.ct_eq(expected);
            return false;
        }
        provided.ct_eq(expected).into()
    }
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Reject requests whose `X-API-Key` header is missing or wrong.
///
/// Without an [`ApiKeyConfig`] extension every request is rejected.
pub async fn api_key_middleware(request: Request, next: Next) -> Response {
    let Some(config) = request.extensions().get::<ApiKeyConfig>().cloned() else {
        return AppError::Internal("api key middleware installed without ApiKeyConfig".into())
            .into_response();
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|v| v.to_str().unwrap_or(""));

    match provided {
        None => {
            tracing::warn!("authentication failed: missing X-API-Key header");
            AppError::Unauthorized("Missing X-API-Key header".into()).into_response()
        }
        Some(key) if !config.matches(key) => {
            tracing::warn!("authentication failed: invalid API key");
            AppError::Unauthorized("Invalid API key".into()).into_response()
        }
        Some(_) => next.run(request).await,
    }
}
