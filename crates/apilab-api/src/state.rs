//! # Application State & Configuration
//!
//! Explicit configuration for the two services, built once at startup,
//! and the shared state passed to route handlers via the `State` extractor.
//!
//! ## Environment
//!
//! | Variable                   | Service    | Default                       |
//! |----------------------------|------------|-------------------------------|
//! | `PORT`                     | both       | 3000 (pricing), 3001 (downstream) |
//! | `PRICING_API_KEY`          | pricing    | `practice1-key-2024`          |
//! | `CATALOG_PATH`             | pricing    | `data/products.json`          |
//! | `CANONICAL_SCHEMA_PATH`    | downstream | `data/canonical-schema.json`  |
//! | `REQUIRE_CANONICAL_SCHEMA` | downstream | `false`                       |

use std::path::PathBuf;
use std::sync::Arc;

use apilab_core::{Catalog, CatalogError, OrderStore};
use apilab_schema::{CanonicalSchema, SchemaError};
use thiserror::Error;

pub const DEFAULT_PRICING_PORT: u16 = 3000;
pub const DEFAULT_DOWNSTREAM_PORT: u16 = 3001;
pub const DEFAULT_PRICING_API_KEY: &str = "practice1-key-2024";
pub const DEFAULT_CATALOG_PATH: &str = "data/products.json";
pub const DEFAULT_SCHEMA_PATH: &str = "data/canonical-schema.json";

/// An environment variable holds a value that cannot be used.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

fn parse_port(lookup: &impl Fn(&str) -> Option<String>, default: u16) -> Result<u16, ConfigError> {
    match lookup("PORT") {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
            var: "PORT",
            reason: format!("{raw:?}: {e}"),
        }),
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(var).as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some("1" | "true" | "yes") => Ok(true),
        Some("0" | "false" | "no") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            var,
            reason: format!("expected true/false, got {other:?}"),
        }),
    }
}

// -- Pricing ------------------------------------------------------------------

/// Configuration for the pricing service.
#[derive(Clone)]
pub struct PricingConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Shared secret expected in the `X-API-Key` header.
    pub api_key: String,
    /// JSON array of products served by the catalog.
    pub catalog_path: PathBuf,
}

impl std::fmt::Debug for PricingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingConfig")
            .field("port", &self.port)
            .field("api_key", &"[REDACTED]")
            .field("catalog_path", &self.catalog_path)
            .finish()
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PRICING_PORT,
            api_key: DEFAULT_PRICING_API_KEY.to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
        }
    }
}

impl PricingConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup, applying defaults for unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let api_key = match lookup("PRICING_API_KEY") {
            None => defaults.api_key,
            Some(key) if key.is_empty() => {
                return Err(ConfigError::Invalid {
                    var: "PRICING_API_KEY",
                    reason: "must not be empty".to_string(),
                })
            }
            Some(key) => key,
        };
        Ok(Self {
            port: parse_port(&lookup, defaults.port)?,
            api_key,
            catalog_path: lookup("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
        })
    }
}

/// Shared state for the pricing service.
#[derive(Clone)]
pub struct PricingState {
    pub catalog: Arc<Catalog>,
    pub api_key: String,
}

impl std::fmt::Debug for PricingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingState")
            .field("products", &self.catalog.len())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl PricingState {
    pub fn new(catalog: Catalog, api_key: impl Into<String>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            api_key: api_key.into(),
        }
    }

    /// Load the catalog named by `config`. A missing or invalid catalog is fatal.
    pub fn from_config(config: &PricingConfig) -> Result<Self, CatalogError> {
        let catalog = Catalog::load(&config.catalog_path)?;
        tracing::info!(
            path = %config.catalog_path.display(),
            products = catalog.len(),
            "loaded product catalog"
        );
        Ok(Self::new(catalog, config.api_key.clone()))
    }
}

// -- Downstream ---------------------------------------------------------------

/// Configuration for the downstream order-intake service.
#[derive(Debug, Clone)]
pub struct DownstreamConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Canonical schema every order is validated against.
    pub schema_path: PathBuf,
    /// Refuse to start when the canonical schema cannot be loaded, instead of
    /// falling back to accepting any JSON object.
    pub require_schema: bool,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_DOWNSTREAM_PORT,
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            require_schema: false,
        }
    }
}

impl DownstreamConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup, applying defaults for unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: parse_port(&lookup, defaults.port)?,
            schema_path: lookup("CANONICAL_SCHEMA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.schema_path),
            require_schema: parse_bool(&lookup, "REQUIRE_CANONICAL_SCHEMA", defaults.require_schema)?,
        })
    }
}

/// Shared state for the downstream service.
///
/// The schema is compiled once at startup; the order store is the only
/// mutable state.
#[derive(Debug, Clone)]
pub struct DownstreamState {
    pub orders: OrderStore,
    pub schema: Arc<CanonicalSchema>,
}

impl DownstreamState {
    pub fn new(schema: CanonicalSchema) -> Self {
        Self {
            orders: OrderStore::new(),
            schema: Arc::new(schema),
        }
    }

    /// Load the canonical schema named by `config`.
    ///
    /// # Errors
    ///
    /// A schema that parses but does not compile is always an error. A
    /// missing or unparsable file is an error only when `require_schema` is set.
    pub fn from_config(config: &DownstreamConfig) -> Result<Self, SchemaError> {
        let schema = if config.require_schema {
            CanonicalSchema::load_required(&config.schema_path)?
        } else {
            CanonicalSchema::load(&config.schema_path)?
        };
        Ok(Self::new(schema))
    }
}
