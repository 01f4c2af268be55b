//! # Product Catalog
//!
//! Read-only product pricing data, loaded once at startup from a JSON array.
//! Lookups never fail: a miss is `None`, which the HTTP layer turns into 404.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::CatalogError;

/// One catalog entry.
///
/// Prices are held as JSON numbers, not floats, and fields beyond the four
/// pricing fields (names, descriptions, ...) are kept verbatim, so the full
/// catalog is served exactly as it was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub unit_price: Number,
    pub currency: String,
    pub tax_rate: Number,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The pricing projection of a product: exactly these four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub product_id: String,
    pub unit_price: Number,
    pub currency: String,
    pub tax_rate: Number,
}

impl Product {
    pub fn quote(&self) -> PriceQuote {
        PriceQuote {
            product_id: self.product_id.clone(),
            unit_price: self.unit_price.clone(),
            currency: self.currency.clone(),
            tax_rate: self.tax_rate.clone(),
        }
    }
}

/// Immutable list of products, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product IDs.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        {
            let mut seen = std::collections::HashSet::new();
            for product in &products {
                if !seen.insert(product.product_id.as_str()) {
                    return Err(CatalogError::DuplicateProduct(product.product_id.clone()));
                }
            }
        }
        Ok(Self { products })
    }

    /// Load a catalog from a JSON file containing an array of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read, is not a product
    /// array, or repeats a product ID.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Self::new(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    /// Pricing projection for one product.
    pub fn quote(&self, product_id: &str) -> Option<PriceQuote> {
        self.find(product_id).map(Product::quote)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
