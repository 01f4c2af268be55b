//! # API Route Modules
//!
//! - `pricing` — catalog and per-product pricing lookups (API-key protected).
//! - `downstream` — order intake, listing, and reset per order category.
//! - `health` — unauthenticated liveness probe shared by both services.

pub mod downstream;
pub mod health;
pub mod pricing;
