//! # Pricing Lookup
//!
//! Routes:
//! - GET /pricing              — full product catalog
//! - GET /pricing/{product_id} — `{productId, unitPrice, currency, taxRate}` or 404
//!
//! Read-only; the catalog is never mutated after startup.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use apilab_core::{PriceQuote, Product};

use crate::error::AppError;
use crate::state::PricingState;

/// Build the pricing router. Authentication is layered on by [`crate::pricing_app`].
pub fn router() -> Router<PricingState> {
    Router::new()
        .route("/pricing", get(list_products))
        .route("/pricing/{product_id}", get(get_price))
}

/// GET /pricing — the catalog as loaded, extra product fields included.
async fn list_products(State(state): State<PricingState>) -> Json<Vec<Product>> {
    Json(state.catalog.products().to_vec())
}

/// GET /pricing/{product_id} — pricing projection for one product.
async fn get_price(
    State(state): State<PricingState>,
    Path(product_id): Path<String>,
) -> Result<Json<PriceQuote>, AppError> {
    match state.catalog.quote(&product_id) {
        Some(quote) => Ok(Json(quote)),
        None => {
            tracing::debug!(%product_id, "product not in catalog");
            Err(AppError::ProductNotFound(product_id))
        }
    }
}
