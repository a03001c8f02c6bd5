//! In-Memory Catalog Store
//!
//! `CatalogStore` holds the live collections in concurrent maps and enforces
//! the entity invariants on insert. Request handlers and the search engine never
//! read the live maps directly; they take a `CatalogSnapshot`, an ordered owned
//! view with all cross-entity resolution helpers on it.

use super::types::{
    Category, CategoryId, Product, ProductId, ProductLink, Profile, ProfileId, slugify,
};
use anyhow::{Context, Result, bail};
use dashmap::DashMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug)]
pub struct CatalogStore {
    categories: DashMap<CategoryId, Category>,
    profiles: DashMap<ProfileId, Profile>,
    products: DashMap<ProductId, Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            categories: DashMap::new(),
            profiles: DashMap::new(),
            products: DashMap::new(),
        }
    }

    pub fn insert_category(&self, category: Category) -> Result<()> {
        if self.categories.contains_key(&category.id) {
            bail!("duplicate category id {}", category.id);
        }
        if self
            .categories
            .iter()
            .any(|entry| entry.value().name == category.name)
        {
            bail!("duplicate category name {:?}", category.name);
        }
        if self
            .categories
            .iter()
            .any(|entry| entry.value().slug == category.slug)
        {
            bail!("duplicate category slug {:?}", category.slug);
        }
        if let Some(parent) = category.parent {
            if parent == category.id {
                bail!("category {} is its own parent", category.id);
            }
            if !self.categories.contains_key(&parent) {
                bail!("category {} references unknown parent {}", category.id, parent);
            }
        }

        self.categories.insert(category.id, category);
        Ok(())
    }

    pub fn insert_profile(&self, profile: Profile) -> Result<()> {
        if self.profiles.contains_key(&profile.id) {
            bail!("duplicate profile id {}", profile.id);
        }
        if !self.categories.contains_key(&profile.category) {
            bail!(
                "profile {} references unknown category {}",
                profile.id,
                profile.category
            );
        }

        self.profiles.insert(profile.id, profile);
        Ok(())
    }

    pub fn insert_product(&self, product: Product) -> Result<()> {
        if self.products.contains_key(&product.id) {
            bail!("duplicate product id {}", product.id);
        }
        if self
            .products
            .iter()
            .any(|entry| entry.value().in_number == product.in_number)
        {
            bail!("duplicate I/N number {:?}", product.in_number);
        }
        match product.link {
            ProductLink::Category(id) if !self.categories.contains_key(&id) => {
                bail!("product {} references unknown category {}", product.id, id);
            }
            ProductLink::Profile(id) if !self.profiles.contains_key(&id) => {
                bail!("product {} references unknown profile {}", product.id, id);
            }
            _ => {}
        }

        self.products.insert(product.id, product);
        Ok(())
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Clones the live collections into an ordered read-only view. Ascending-id
    /// iteration makes the search candidate sequence (and its tie-breaks)
    /// deterministic across calls.
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            categories: self
                .categories
                .iter()
                .map(|entry| (*entry.key(), entry.value().clone()))
                .collect(),
            profiles: self
                .profiles
                .iter()
                .map(|entry| (*entry.key(), entry.value().clone()))
                .collect(),
            products: self
                .products
                .iter()
                .map(|entry| (*entry.key(), entry.value().clone()))
                .collect(),
        }
    }
}

/// An ordered, immutable view of the catalog taken at request time.
pub struct CatalogSnapshot {
    pub categories: BTreeMap<CategoryId, Category>,
    pub profiles: BTreeMap<ProfileId, Profile>,
    pub products: BTreeMap<ProductId, Product>,
}

impl CatalogSnapshot {
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.get(&id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.values().find(|c| c.slug == slug)
    }

    pub fn root_categories(&self) -> Vec<&Category> {
        self.categories
            .values()
            .filter(|c| c.parent.is_none())
            .collect()
    }

    pub fn children_of(&self, id: CategoryId) -> Vec<&Category> {
        self.categories
            .values()
            .filter(|c| c.parent == Some(id))
            .collect()
    }

    pub fn profiles_of(&self, id: CategoryId) -> Vec<&Profile> {
        self.profiles
            .values()
            .filter(|p| p.category == id)
            .collect()
    }

    pub fn direct_products_of(&self, id: CategoryId) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| p.link == ProductLink::Category(id))
            .collect()
    }

    pub fn products_of_profile(&self, id: ProfileId) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| p.link == ProductLink::Profile(id))
            .collect()
    }

    /// The profile a product is linked through, if any.
    pub fn linked_profile(&self, product: &Product) -> Option<&Profile> {
        match product.link {
            ProductLink::Profile(id) => self.profiles.get(&id),
            ProductLink::Category(_) => None,
        }
    }

    /// The category a product resolves to: the direct link, or the linked
    /// profile's category. A dangling link resolves to "no category" rather
    /// than failing; display code tolerates the absence.
    pub fn resolved_category(&self, product: &Product) -> Option<&Category> {
        match product.link {
            ProductLink::Category(id) => self.categories.get(&id),
            ProductLink::Profile(id) => self
                .profiles
                .get(&id)
                .and_then(|profile| self.categories.get(&profile.category)),
        }
    }

    /// Display name: the profile name, else the category name.
    pub fn display_name(&self, product: &Product) -> String {
        if let Some(profile) = self.linked_profile(product) {
            return profile.name.clone();
        }
        if let Some(category) = self.resolved_category(product) {
            return category.name.clone();
        }
        "Unnamed Product".to_string()
    }

    /// Image fallback chain: product -> profile -> profile's category ->
    /// direct category; first non-empty wins.
    pub fn display_image(&self, product: &Product) -> Option<String> {
        if product.image_url.is_some() {
            return product.image_url.clone();
        }
        if let Some(profile) = self.linked_profile(product) {
            return self.profile_display_image(profile);
        }
        self.resolved_category(product)
            .and_then(|category| category.image_url.clone())
    }

    /// Profile image with category fallback.
    pub fn profile_display_image(&self, profile: &Profile) -> Option<String> {
        if profile.image_url.is_some() {
            return profile.image_url.clone();
        }
        self.categories
            .get(&profile.category)
            .and_then(|category| category.image_url.clone())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<CategoryRecord>,
    #[serde(default)]
    profiles: Vec<ProfileRecord>,
    #[serde(default)]
    products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    id: CategoryId,
    name: String,
    slug: Option<String>,
    image_url: Option<String>,
    parent: Option<CategoryId>,
}

#[derive(Debug, Deserialize)]
struct ProfileRecord {
    id: ProfileId,
    category: CategoryId,
    name: String,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: ProductId,
    category: Option<CategoryId>,
    profile: Option<ProfileId>,
    option: String,
    in_number: String,
    note: Option<String>,
    price: Option<f64>,
    location: Option<String>,
    image_url: Option<String>,
}

/// Parses a JSON catalog document into a validated store.
///
/// Products carry two optional link fields on the wire; exactly one must be set
/// and is folded into `ProductLink` here, so the rest of the service never sees
/// the invalid states. Category slugs are derived from the name when absent.
pub fn parse_catalog(json: &str) -> Result<CatalogStore> {
    let file: CatalogFile = serde_json::from_str(json).context("invalid catalog JSON")?;
    let store = CatalogStore::new();

    for record in file.categories {
        let slug = record.slug.unwrap_or_else(|| slugify(&record.name));
        store
            .insert_category(Category {
                id: record.id,
                name: record.name,
                slug,
                image_url: record.image_url,
                parent: record.parent,
            })
            .with_context(|| format!("category {}", record.id))?;
    }

    for record in file.profiles {
        store
            .insert_profile(Profile {
                id: record.id,
                category: record.category,
                name: record.name,
                image_url: record.image_url,
            })
            .with_context(|| format!("profile {}", record.id))?;
    }

    for record in file.products {
        let link = match (record.category, record.profile) {
            (Some(category), None) => ProductLink::Category(category),
            (None, Some(profile)) => ProductLink::Profile(profile),
            (Some(_), Some(_)) => {
                bail!("product {} links both a category and a profile", record.id)
            }
            (None, None) => {
                bail!("product {} links neither a category nor a profile", record.id)
            }
        };
        store
            .insert_product(Product {
                id: record.id,
                link,
                option: record.option,
                in_number: record.in_number,
                note: record.note,
                price: record.price,
                location: record.location,
                image_url: record.image_url,
            })
            .with_context(|| format!("product {}", record.id))?;
    }

    Ok(store)
}

/// Loads the catalog file given on the command line. Any failure aborts
/// startup; a broken catalog is never served as an empty one.
pub fn load_catalog(path: &Path) -> Result<CatalogStore> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    let store = parse_catalog(&json)
        .with_context(|| format!("failed to parse catalog file {}", path.display()))?;

    tracing::info!(
        "Catalog loaded: {} categories, {} profiles, {} products",
        store.category_count(),
        store.profile_count(),
        store.product_count()
    );

    Ok(store)
}
