//! Search Engine
//!
//! Candidate filtering and ranking orchestration. The filter is the membership
//! gate: a candidate must match every query term through at least one lexical
//! variant in at least one of its text fields. The score (see `scoring.rs`)
//! only orders the product pool; zero-scoring candidates still appear.

use super::scoring::{ProductText, score_product};
use super::tokenizer::{ParsedQuery, UnitTag};
use super::types::{CategoryHit, ProductHit, ProfileHit, SearchResponse};
use crate::catalog::store::CatalogSnapshot;
use crate::catalog::types::Product;

pub const MIN_QUERY_CHARS: usize = 2;

const PRODUCT_POOL_LIMIT: usize = 50;
const PRODUCT_RESULT_LIMIT: usize = 20;
const PROFILE_RESULT_LIMIT: usize = 30;
const CATEGORY_RESULT_LIMIT: usize = 30;

/// Answers a free-text query from a catalog snapshot. Pure and deterministic:
/// the snapshot iterates in ascending-id order, the sort is stable, and ties
/// keep that input order.
pub fn search(query: &str, catalog: &CatalogSnapshot) -> SearchResponse {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return SearchResponse::empty();
    }

    let parsed = ParsedQuery::new(trimmed);

    SearchResponse {
        products: rank_products(&parsed, catalog),
        profiles: filter_profiles(&parsed, catalog),
        categories: filter_categories(&parsed, catalog),
    }
}

fn rank_products(parsed: &ParsedQuery, catalog: &CatalogSnapshot) -> Vec<ProductHit> {
    let mut pool: Vec<(&Product, ProductText)> = Vec::new();

    for product in catalog.products.values() {
        if pool.len() == PRODUCT_POOL_LIMIT {
            break;
        }

        let text = ProductText {
            option: product.option.clone(),
            profile_name: catalog
                .linked_profile(product)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            category_name: catalog
                .resolved_category(product)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        };

        // The resolved category and the profile's category coincide for
        // profile-linked products, so one haystack covers both.
        let fields = [
            text.option.to_lowercase(),
            product.note.as_deref().unwrap_or_default().to_lowercase(),
            text.profile_name.to_lowercase(),
            text.category_name.to_lowercase(),
            product.in_number.to_lowercase(),
        ];

        if parsed.terms.iter().all(|term| term.matches(&fields)) {
            pool.push((product, text));
        }
    }

    let mut scored: Vec<(f64, &Product)> = pool
        .into_iter()
        .map(|(product, text)| (score_product(parsed, &text), product))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(PRODUCT_RESULT_LIMIT);

    scored
        .into_iter()
        .map(|(_, product)| ProductHit {
            id: product.id,
            name: catalog.display_name(product),
            option: product.option.clone(),
            category: catalog
                .resolved_category(product)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            profile: catalog
                .linked_profile(product)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            image_url: catalog.display_image(product),
            in_number: product.in_number.clone(),
            price: product.price,
        })
        .collect()
}

fn filter_profiles(parsed: &ParsedQuery, catalog: &CatalogSnapshot) -> Vec<ProfileHit> {
    let mut hits = Vec::new();

    for profile in catalog.profiles.values() {
        if hits.len() == PROFILE_RESULT_LIMIT {
            break;
        }

        let category = catalog.category(profile.category);
        let fields = [
            profile.name.to_lowercase(),
            category.map(|c| c.name.to_lowercase()).unwrap_or_default(),
        ];

        // A bare length like "3m" refers to an option, not a dimensional
        // name; such terms contribute no constraint here.
        let matched = parsed
            .terms
            .iter()
            .all(|term| term.unit == UnitTag::Metres || term.matches(&fields));

        if matched {
            hits.push(ProfileHit {
                id: profile.id,
                name: profile.name.clone(),
                category: category.map(|c| c.name.clone()).unwrap_or_default(),
                slug: category.map(|c| c.slug.clone()).unwrap_or_default(),
            });
        }
    }

    hits
}

fn filter_categories(parsed: &ParsedQuery, catalog: &CatalogSnapshot) -> Vec<CategoryHit> {
    let mut hits = Vec::new();

    for category in catalog.categories.values() {
        if hits.len() == CATEGORY_RESULT_LIMIT {
            break;
        }

        let fields = [category.name.to_lowercase()];
        let matched = parsed
            .terms
            .iter()
            .all(|term| term.unit == UnitTag::Metres || term.matches(&fields));

        if matched {
            hits.push(CategoryHit {
                id: category.id,
                name: category.name.clone(),
                slug: category.slug.clone(),
            });
        }
    }

    hits
}
