//! # Order Category
//!
//! The closed set of order classes that partition the order store.
//! The category is parsed from the request path before any validation runs,
//! so an unknown value never reaches the schema validator.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CategoryError;

/// Order class: `standard`, `express`, or `b2b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderCategory {
    Standard,
    Express,
    B2b,
}

/// Number of order categories.
pub const ORDER_CATEGORY_COUNT: usize = 3;

impl OrderCategory {
    /// All categories in store order.
    pub fn all() -> &'static [OrderCategory; ORDER_CATEGORY_COUNT] {
        &[Self::Standard, Self::Express, Self::B2b]
    }

    /// Path segment / wire name for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::B2b => "b2b",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Standard => 0,
            Self::Express => 1,
            Self::B2b => 2,
        }
    }
}

impl std::fmt::Display for OrderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderCategory {
    type Err = CategoryError;

    /// Case-sensitive: only the exact wire names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "b2b" => Ok(Self::B2b),
            other => Err(CategoryError::Unknown(other.to_string())),
        }
    }
}
