//! # Integration Tests for the Pricing Service
//!
//! Catalog listing, per-product projection, 404 on unknown products, and the
//! `X-API-Key` gate with its health-probe exemption.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use apilab_api::state::PricingState;
use apilab_core::{Catalog, Product};

const KEY: &str = "test-key";

/// Helper: a two-product catalog behind the test key.
fn test_app() -> axum::Router {
    let products: Vec<Product> = serde_json::from_value(json!([
        {"productId": "P001", "name": "Widget", "unitPrice": 19.99, "currency": "EUR", "taxRate": 0.21},
        {"productId": "P002", "name": "Gadget", "unitPrice": 4.5, "currency": "EUR", "taxRate": 0.09}
    ]))
    .unwrap();
    let state = PricingState::new(Catalog::new(products).unwrap(), KEY);
    apilab_api::pricing_app(state)
}

fn get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(Body::empty()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// -- Lookups ------------------------------------------------------------------

#[tokio::test]
async fn test_known_product_returns_exact_projection() {
    let response = test_app().oneshot(get("/pricing/P001", Some(KEY))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"productId": "P001", "unitPrice": 19.99, "currency": "EUR", "taxRate": 0.21})
    );
}

#[tokio::test]
async fn test_unknown_product_is_404_with_product_id() {
    let response = test_app().oneshot(get("/pricing/P999", Some(KEY))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Product not found");
    assert_eq!(body["error"]["details"]["productId"], "P999");
}

#[tokio::test]
async fn test_list_returns_full_catalog() {
    let response = test_app().oneshot(get("/pricing", Some(KEY))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["name"], "Widget");
    assert_eq!(products[1]["productId"], "P002");
}

// -- Authentication -----------------------------------------------------------

#[tokio::test]
async fn test_missing_key_is_401() {
    for uri in ["/pricing", "/pricing/P001", "/pricing/P999"] {
        let response = test_app().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Missing X-API-Key header"));
    }
}

#[tokio::test]
async fn test_wrong_key_is_401() {
    let response = test_app()
        .oneshot(get("/pricing/P001", Some("not-the-key")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid API key"));
}

#[tokio::test]
async fn test_health_is_exempt_from_key_check() {
    let response = test_app().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}
