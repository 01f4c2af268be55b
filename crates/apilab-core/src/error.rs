//! # Error Types
//!
//! Errors for the order and catalog domain. All use `thiserror`.

use thiserror::Error;

/// An order category path segment that is not one of the known categories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Invalid order type: {0}")]
    Unknown(String),
}

/// The product catalog could not be loaded.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a JSON array of products.
    #[error("invalid catalog '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two catalog entries share a product ID.
    #[error("duplicate product ID in catalog: {0}")]
    DuplicateProduct(String),
}
