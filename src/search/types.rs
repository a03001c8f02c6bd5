//! Search Data Types
//!
//! Data Transfer Objects (DTOs) for the search API response. Collection order
//! is the ranking/filtering order computed by the engine; nothing downstream
//! re-sorts.

use crate::catalog::types::{CategoryId, ProductId, ProfileId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductHit {
    pub id: ProductId,
    /// Display name derived from the profile or category.
    pub name: String,
    pub option: String,
    /// Resolved category name, empty if the link dangles.
    pub category: String,
    /// Profile name, empty when the product is linked to a category directly.
    pub profile: String,
    /// Product -> profile -> category fallback chain, first non-empty wins.
    pub image_url: Option<String>,
    pub in_number: String,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileHit {
    pub id: ProfileId,
    pub name: String,
    /// Owning category name.
    pub category: String,
    /// Owning category slug.
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryHit {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub products: Vec<ProductHit>,
    pub profiles: Vec<ProfileHit>,
    pub categories: Vec<CategoryHit>,
}

impl SearchResponse {
    /// The canonical empty response, returned for sub-minimum queries.
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            profiles: Vec::new(),
            categories: Vec::new(),
        }
    }
}
