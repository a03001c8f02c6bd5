//! Catalog Entity Types
//!
//! Defines the persistent entities (categories, profiles, products) and the
//! derived attribute helpers that do not require cross-entity lookups.
//! Anything that needs to resolve a link (display name, image fallback chain)
//! lives on `CatalogSnapshot` in `store.rs` instead.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub type CategoryId = u64;
pub type ProfileId = u64;
pub type ProductId = u64;

/// A classification node in the category tree, e.g. "Timber" or "Plasterboard".
///
/// Root categories have no `parent`. The `slug` is the URL-safe identifier,
/// unique and stable once assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub parent: Option<CategoryId>,
}

/// A named dimensional variant within a category, e.g. "90 x 35mm".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub category: CategoryId,
    pub name: String,
    pub image_url: Option<String>,
}

/// The owning link of a product: a category directly, or a profile (and through
/// it the profile's category). Exactly one of the two, by construction; the
/// both-set/neither-set states are unrepresentable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductLink {
    Category(CategoryId),
    Profile(ProfileId),
}

/// A sellable stock-keeping unit.
///
/// `option` is the free-text specification string (length, size, or other spec)
/// and `in_number` is the unique external identifier printed on shelf labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub link: ProductLink,
    pub option: String,
    pub in_number: String,
    pub note: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

// "3000 x 1350mm 10mm" is spelled with a space where an "x" belongs.
static MM_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"mm\s+").unwrap());

impl Profile {
    /// Extracts the numeric dimensions from the profile name.
    ///
    /// Handles "90 x 35mm" -> [90, 35], "2400 x 1200 x 10mm" -> [2400, 1200, 10]
    /// and the "3000 x 1350mm 10mm" spelling -> [3000, 1350, 10]. Names that do
    /// not parse (e.g. "Round Post") yield an empty list, never an error.
    pub fn dimensions(&self) -> Vec<i64> {
        let cleaned = MM_GAP.replace_all(self.name.trim(), " x ");
        let mut dims = Vec::new();

        for part in cleaned.split('x') {
            let mut part = part.trim();
            if let Some(stripped) = part.strip_suffix("mm") {
                part = stripped.trim_end();
            } else if let Some((head, _)) = part.split_once(' ') {
                part = head;
            }
            match part.parse::<i64>() {
                Ok(value) => dims.push(value),
                Err(_) => return Vec::new(),
            }
        }

        dims
    }

    /// First dimension, used to sort profiles numerically within a category.
    pub fn width(&self) -> i64 {
        self.dimensions().first().copied().unwrap_or(0)
    }

    /// Third dimension if present (sheet thickness), 0 otherwise.
    pub fn thickness(&self) -> i64 {
        self.dimensions().get(2).copied().unwrap_or(0)
    }
}

/// Derives a URL-safe slug from a category name: lowercased, with runs of
/// non-alphanumeric characters collapsed to single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    let mut gap = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }

    slug
}
