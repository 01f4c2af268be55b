//! # Downstream Order Intake
//!
//! Routes:
//! - POST   /downstream/{order_type}        — validate and store one order
//! - GET    /downstream/{order_type}/orders — stored orders, oldest first
//! - DELETE /downstream/{order_type}/orders — drop every order of that type
//!
//! `order_type` is checked before anything else. Intake answers with its own
//! body shape:
//!
//! ```text
//! 200 {"status": "accepted", "orderId": ..., "validation": "passed"}
//! 400 {"status": "rejected", "errors": [...]}
//! ```
//!
//! where `errors` holds either one message string (bad type, unreadable body)
//! or the full list of schema violations.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use apilab_core::OrderCategory;
use apilab_schema::ValidationError;

use crate::error::AppError;
use crate::extractors::json_body;
use crate::state::DownstreamState;

/// Build the downstream router.
pub fn router() -> Router<DownstreamState> {
    Router::new()
        .route("/downstream/{order_type}", post(submit_order))
        .route(
            "/downstream/{order_type}/orders",
            get(list_orders).delete(clear_orders),
        )
}

// -- Response types -----------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStatus {
    Accepted,
    Rejected,
}

/// One entry of a rejection's `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RejectionReason {
    Schema(ValidationError),
    Message(String),
}

/// Body of every `POST /downstream/{order_type}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    pub status: IntakeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RejectionReason>,
}

impl IntakeResponse {
    fn accepted(order_id: Option<Value>) -> Self {
        Self {
            status: IntakeStatus::Accepted,
            order_id,
            validation: Some("passed".to_string()),
            errors: Vec::new(),
        }
    }

    fn rejected(errors: Vec<RejectionReason>) -> Self {
        Self {
            status: IntakeStatus::Rejected,
            order_id: None,
            validation: None,
            errors,
        }
    }
}

impl IntoResponse for IntakeResponse {
    fn into_response(self) -> Response {
        let status = match self.status {
            IntakeStatus::Accepted => StatusCode::OK,
            IntakeStatus::Rejected => StatusCode::BAD_REQUEST,
        };
        (status, Json(self)).into_response()
    }
}

/// Body of `DELETE /downstream/{order_type}/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearResponse {
    pub message: String,
    pub cleared: usize,
}

// -- Handlers -----------------------------------------------------------------

/// POST /downstream/{order_type}
async fn submit_order(
    State(state): State<DownstreamState>,
    Path(order_type): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> IntakeResponse {
    let category: OrderCategory = match order_type.parse() {
        Ok(category) => category,
        Err(err) => {
            tracing::warn!(%order_type, "order rejected: unknown order type");
            return IntakeResponse::rejected(vec![RejectionReason::Message(format!("{err}"))]);
        }
    };

    let order = match json_body(body) {
        Ok(order) => order,
        Err(reason) => {
            tracing::warn!(%category, %reason, "order rejected: unreadable body");
            return IntakeResponse::rejected(vec![RejectionReason::Message(reason)]);
        }
    };
    tracing::debug!(%category, %order, "received order");

    match state.orders.submit(category, order, state.schema.validator()) {
        Ok(accepted) => {
            tracing::info!(
                %category,
                order_id = ?accepted.order_id,
                stored = accepted.stored,
                "order accepted"
            );
            IntakeResponse::accepted(accepted.order_id)
        }
        Err(verdict) => {
            tracing::warn!(%category, errors = verdict.errors().len(), "order rejected: {verdict}");
            IntakeResponse::rejected(
                verdict
                    .into_errors()
                    .into_iter()
                    .map(RejectionReason::Schema)
                    .collect(),
            )
        }
    }
}

/// GET /downstream/{order_type}/orders
async fn list_orders(
    State(state): State<DownstreamState>,
    Path(order_type): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let category: OrderCategory = order_type.parse()?;
    Ok(Json(state.orders.list(category)))
}

/// DELETE /downstream/{order_type}/orders
async fn clear_orders(
    State(state): State<DownstreamState>,
    Path(order_type): Path<String>,
) -> Result<Json<ClearResponse>, AppError> {
    let category: OrderCategory = order_type.parse()?;
    let cleared = state.orders.clear(category);
    tracing::info!(%category, cleared, "orders cleared");
    Ok(Json(ClearResponse {
        message: format!("Orders cleared for {category}"),
        cleared,
    }))
}
