//! Search HTTP Handlers

use super::engine::search;
use super::types::SearchResponse;
use crate::catalog::store::CatalogStore;
use axum::extract::Query;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SearchParams {
    /// Absent or sub-minimum queries yield the empty response, not an error.
    pub q: Option<String>,
}

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(store): Extension<Arc<CatalogStore>>,
) -> Json<SearchResponse> {
    let query = params.q.unwrap_or_default();
    let snapshot = store.snapshot();

    let response = search(&query, &snapshot);
    tracing::debug!(
        "Search {:?}: {} products, {} profiles, {} categories",
        query,
        response.products.len(),
        response.profiles.len(),
        response.categories.len()
    );

    Json(response)
}
