//! # apilab-api — Mock HTTP Services
//!
//! Two small axum applications used as integration targets:
//!
//! - [`pricing_app`] — `/pricing*` product lookups behind an `X-API-Key` check.
//! - [`downstream_app`] — `/downstream/*` order intake validated against the
//!   canonical JSON Schema, with in-memory per-category storage.
//!
//! Both mount `GET /health` outside any authentication.
//!
//! ## Middleware Stack (Tower)
//!
//! TraceLayer → AuthLayer (pricing only)
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers — validation and storage live in
//!   `apilab-schema` and `apilab-core`.
//! - Non-intake errors map to structured HTTP responses via `AppError`.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::ApiKeyConfig;

pub use error::AppError;
pub use state::{DownstreamConfig, DownstreamState, PricingConfig, PricingState};

/// Assemble the pricing service.
///
/// Every `/pricing*` route requires the configured key; `/health` does not.
pub fn pricing_app(state: PricingState) -> Router {
    let key = ApiKeyConfig::new(state.api_key.clone());

    let api = routes::pricing::router()
        .layer(from_fn(auth::api_key_middleware))
        .layer(axum::Extension(key))
        .with_state(state);

    Router::new()
        .merge(routes::health::router())
        .merge(api)
        .layer(TraceLayer::new_for_http())
}

/// Assemble the downstream order-intake service.
pub fn downstream_app(state: DownstreamState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::downstream::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
