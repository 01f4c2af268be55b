//! # apilab-core — Orders and Catalog
//!
//! Domain types behind the two mock services:
//!
//! - [`OrderCategory`] — the closed set `standard | express | b2b`.
//! - [`OrderStore`] — per-category lists of orders that passed validation.
//! - [`Catalog`] / [`Product`] / [`PriceQuote`] — read-only pricing data.
//!
//! ## Crate Policy
//!
//! - Depends only on `apilab-schema` internally.
//! - No HTTP types; the API crate maps these to responses.
//! - No `.unwrap()` outside tests.

pub mod catalog;
pub mod category;
pub mod error;
pub mod orders;

pub use catalog::{Catalog, PriceQuote, Product};
pub use category::{OrderCategory, ORDER_CATEGORY_COUNT};
pub use error::{CatalogError, CategoryError};
pub use orders::{Accepted, OrderStore};
