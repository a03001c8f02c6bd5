//! Catalog Browse Handlers
//!
//! Read-only JSON endpoints mirroring the catalog pages: the root category
//! list, category detail (children, width-sorted profiles, direct products),
//! profile resolution (a profile page forwards to its first product), and
//! product detail with its profile siblings.

use super::store::{CatalogSnapshot, CatalogStore};
use super::types::{Category, CategoryId, Product, ProductId, ProfileId};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileSummary {
    pub id: ProfileId,
    pub name: String,
    pub image_url: Option<String>,
}

/// Full product rendition used by the detail endpoint: a search hit plus the
/// fields only shown on the product page itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub option: String,
    pub category: String,
    pub profile: String,
    pub in_number: String,
    pub price: Option<f64>,
    pub note: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryDetailResponse {
    pub category: CategorySummary,
    pub children: Vec<CategorySummary>,
    pub profiles: Vec<ProfileSummary>,
    pub products: Vec<ProductView>,
}

/// Where a profile page should land: its first product, or (when the profile
/// has no products yet) back to the owning category.
#[derive(Debug, Serialize)]
pub struct ProfileResolutionResponse {
    pub profile: ProfileSummary,
    pub product_id: Option<ProductId>,
    pub category_slug: String,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub product: ProductView,
    pub siblings: Vec<ProductView>,
}

fn category_summary(category: &Category) -> CategorySummary {
    CategorySummary {
        id: category.id,
        name: category.name.clone(),
        slug: category.slug.clone(),
        image_url: category.image_url.clone(),
    }
}

fn product_view(snapshot: &CatalogSnapshot, product: &Product) -> ProductView {
    ProductView {
        id: product.id,
        name: snapshot.display_name(product),
        option: product.option.clone(),
        category: snapshot
            .resolved_category(product)
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        profile: snapshot
            .linked_profile(product)
            .map(|p| p.name.clone())
            .unwrap_or_default(),
        in_number: product.in_number.clone(),
        price: product.price,
        note: product.note.clone(),
        location: product.location.clone(),
        image_url: snapshot.display_image(product),
    }
}

pub async fn handle_list_categories(
    Extension(store): Extension<Arc<CatalogStore>>,
) -> Json<Vec<CategorySummary>> {
    let snapshot = store.snapshot();
    let roots = snapshot
        .root_categories()
        .into_iter()
        .map(category_summary)
        .collect();
    Json(roots)
}

pub async fn handle_category_detail(
    Path(slug): Path<String>,
    Extension(store): Extension<Arc<CatalogStore>>,
) -> (StatusCode, Json<Option<CategoryDetailResponse>>) {
    let snapshot = store.snapshot();

    let Some(category) = snapshot.category_by_slug(&slug) else {
        tracing::debug!("Category not found for slug {:?}", slug);
        return (StatusCode::NOT_FOUND, Json(None));
    };

    let children = snapshot
        .children_of(category.id)
        .into_iter()
        .map(category_summary)
        .collect();

    let mut profiles = snapshot.profiles_of(category.id);
    profiles.sort_by_key(|profile| (profile.width(), profile.id));
    let profiles = profiles
        .into_iter()
        .map(|profile| ProfileSummary {
            id: profile.id,
            name: profile.name.clone(),
            image_url: snapshot.profile_display_image(profile),
        })
        .collect();

    let mut products = snapshot.direct_products_of(category.id);
    products.sort_by(|a, b| (&a.option, a.id).cmp(&(&b.option, b.id)));
    let products = products
        .into_iter()
        .map(|product| product_view(&snapshot, product))
        .collect();

    (
        StatusCode::OK,
        Json(Some(CategoryDetailResponse {
            category: category_summary(category),
            children,
            profiles,
            products,
        })),
    )
}

pub async fn handle_profile_resolution(
    Path(id): Path<ProfileId>,
    Extension(store): Extension<Arc<CatalogStore>>,
) -> (StatusCode, Json<Option<ProfileResolutionResponse>>) {
    let snapshot = store.snapshot();

    let Some(profile) = snapshot.profile(id) else {
        tracing::debug!("Profile {} not found", id);
        return (StatusCode::NOT_FOUND, Json(None));
    };

    let first_product = snapshot
        .products_of_profile(id)
        .first()
        .map(|product| product.id);
    let category_slug = snapshot
        .category(profile.category)
        .map(|c| c.slug.clone())
        .unwrap_or_default();

    (
        StatusCode::OK,
        Json(Some(ProfileResolutionResponse {
            profile: ProfileSummary {
                id: profile.id,
                name: profile.name.clone(),
                image_url: snapshot.profile_display_image(profile),
            },
            product_id: first_product,
            category_slug,
        })),
    )
}

pub async fn handle_product_detail(
    Path(id): Path<ProductId>,
    Extension(store): Extension<Arc<CatalogStore>>,
) -> (StatusCode, Json<Option<ProductDetailResponse>>) {
    let snapshot = store.snapshot();

    let Some(product) = snapshot.product(id) else {
        tracing::debug!("Product {} not found", id);
        return (StatusCode::NOT_FOUND, Json(None));
    };

    let mut siblings: Vec<&Product> = match snapshot.linked_profile(product) {
        Some(profile) => snapshot.products_of_profile(profile.id),
        None => Vec::new(),
    };
    siblings.sort_by(|a, b| (&a.option, a.id).cmp(&(&b.option, b.id)));
    let siblings = siblings
        .into_iter()
        .map(|sibling| product_view(&snapshot, sibling))
        .collect();

    (
        StatusCode::OK,
        Json(Some(ProductDetailResponse {
            product: product_view(&snapshot, product),
            siblings,
        })),
    )
}
