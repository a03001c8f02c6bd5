//! Catalog Module Tests
//!
//! Validates the entity model, derived attributes, store invariants and the
//! catalog file loader.
//!
//! ## Test Scopes
//! - **Types**: slug derivation, profile dimension parsing.
//! - **Snapshot**: link resolution, display name and image fallback chains.
//! - **Store**: invariant enforcement on insert.
//! - **Loader**: either-or link validation, slug defaulting, error surfacing.

#[cfg(test)]
mod tests {
    use crate::catalog::store::{CatalogStore, parse_catalog};
    use crate::catalog::types::{Category, Product, ProductLink, Profile, slugify};

    fn category(id: u64, name: &str, parent: Option<u64>) -> Category {
        Category {
            id,
            name: name.to_string(),
            slug: slugify(name),
            image_url: None,
            parent,
        }
    }

    fn profile(id: u64, category: u64, name: &str) -> Profile {
        Profile {
            id,
            category,
            name: name.to_string(),
            image_url: None,
        }
    }

    fn product(id: u64, link: ProductLink, option: &str, in_number: &str) -> Product {
        Product {
            id,
            link,
            option: option.to_string(),
            in_number: in_number.to_string(),
            note: None,
            price: None,
            location: None,
            image_url: None,
        }
    }

    // ============================================================
    // SLUG TESTS
    // ============================================================

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Treated Pine"), "treated-pine");
        assert_eq!(slugify("Timber"), "timber");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  MDF -- Sheets!  "), "mdf-sheets");
        assert_eq!(slugify("90 x 35mm"), "90-x-35mm");
    }

    #[test]
    fn test_slugify_empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("---"), "");
    }

    // ============================================================
    // PROFILE DIMENSION TESTS
    // ============================================================

    #[test]
    fn test_dimensions_timber_pair() {
        let p = profile(1, 1, "90 x 35mm");
        assert_eq!(p.dimensions(), vec![90, 35]);
        assert_eq!(p.width(), 90);
        assert_eq!(p.thickness(), 0, "no third dimension");
    }

    #[test]
    fn test_dimensions_sheet_triple() {
        let p = profile(1, 1, "2400 x 1200 x 10mm");
        assert_eq!(p.dimensions(), vec![2400, 1200, 10]);
        assert_eq!(p.width(), 2400);
        assert_eq!(p.thickness(), 10);
    }

    #[test]
    fn test_dimensions_mm_gap_spelling() {
        // "3000 x 1350mm 10mm" is spelled with a space where an "x" belongs.
        let p = profile(1, 1, "3000 x 1350mm 10mm");
        assert_eq!(p.dimensions(), vec![3000, 1350, 10]);
    }

    #[test]
    fn test_dimensions_unparseable_name() {
        let p = profile(1, 1, "Round Post");
        assert_eq!(p.dimensions(), Vec::<i64>::new());
        assert_eq!(p.width(), 0);
    }

    // ============================================================
    // SNAPSHOT TESTS - link resolution and display attributes
    // ============================================================

    #[test]
    fn test_resolved_category_through_profile() {
        let store = CatalogStore::new();
        store.insert_category(category(1, "Timber", None)).unwrap();
        store.insert_profile(profile(1, 1, "90 x 35mm")).unwrap();
        store
            .insert_product(product(1, ProductLink::Profile(1), "2.4m", "IN001"))
            .unwrap();
        let snapshot = store.snapshot();

        let p = snapshot.product(1).unwrap();
        assert_eq!(snapshot.resolved_category(p).unwrap().name, "Timber");
        assert_eq!(snapshot.linked_profile(p).unwrap().name, "90 x 35mm");
        assert_eq!(snapshot.display_name(p), "90 x 35mm");
    }

    #[test]
    fn test_display_name_for_direct_link() {
        let store = CatalogStore::new();
        store.insert_category(category(1, "Timber", None)).unwrap();
        store
            .insert_product(product(1, ProductLink::Category(1), "Sleeper", "IN001"))
            .unwrap();
        let snapshot = store.snapshot();

        let p = snapshot.product(1).unwrap();
        assert_eq!(snapshot.display_name(p), "Timber");
        assert!(snapshot.linked_profile(p).is_none());
    }

    #[test]
    fn test_image_fallback_chain() {
        let store = CatalogStore::new();
        let mut cat = category(1, "Timber", None);
        cat.image_url = Some("cat.jpg".to_string());
        store.insert_category(cat).unwrap();

        let mut prof = profile(1, 1, "90 x 35mm");
        prof.image_url = Some("profile.jpg".to_string());
        store.insert_profile(prof).unwrap();
        store.insert_profile(profile(2, 1, "90 x 45mm")).unwrap();

        let mut own_image = product(1, ProductLink::Profile(1), "", "IN001");
        own_image.image_url = Some("product.jpg".to_string());
        store.insert_product(own_image).unwrap();
        store
            .insert_product(product(2, ProductLink::Profile(1), "", "IN002"))
            .unwrap();
        store
            .insert_product(product(3, ProductLink::Profile(2), "", "IN003"))
            .unwrap();
        store
            .insert_product(product(4, ProductLink::Category(1), "", "IN004"))
            .unwrap();
        let snapshot = store.snapshot();

        // Product image wins over everything.
        assert_eq!(
            snapshot.display_image(snapshot.product(1).unwrap()),
            Some("product.jpg".to_string())
        );
        // Falls back to the profile image.
        assert_eq!(
            snapshot.display_image(snapshot.product(2).unwrap()),
            Some("profile.jpg".to_string())
        );
        // Profile without an image falls back to its category.
        assert_eq!(
            snapshot.display_image(snapshot.product(3).unwrap()),
            Some("cat.jpg".to_string())
        );
        // Direct category link uses the category image.
        assert_eq!(
            snapshot.display_image(snapshot.product(4).unwrap()),
            Some("cat.jpg".to_string())
        );
    }

    #[test]
    fn test_snapshot_tree_and_collection_helpers() {
        let store = CatalogStore::new();
        store.insert_category(category(1, "Timber", None)).unwrap();
        store
            .insert_category(category(2, "Treated Pine", Some(1)))
            .unwrap();
        store
            .insert_category(category(3, "Plasterboard", None))
            .unwrap();
        store.insert_profile(profile(1, 1, "90 x 35mm")).unwrap();
        store.insert_profile(profile(2, 1, "180 x 45mm")).unwrap();
        store
            .insert_product(product(1, ProductLink::Profile(1), "2.4m", "IN001"))
            .unwrap();
        store
            .insert_product(product(2, ProductLink::Profile(1), "3.0m", "IN002"))
            .unwrap();
        let snapshot = store.snapshot();

        let roots: Vec<&str> = snapshot
            .root_categories()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(roots, vec!["Timber", "Plasterboard"]);

        let children: Vec<&str> = snapshot
            .children_of(1)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(children, vec!["Treated Pine"]);

        assert_eq!(snapshot.profiles_of(1).len(), 2);
        assert_eq!(snapshot.products_of_profile(1).len(), 2);
        assert!(snapshot.direct_products_of(1).is_empty());
        assert_eq!(snapshot.category_by_slug("treated-pine").unwrap().id, 2);
    }

    #[test]
    fn test_profile_width_orders_numerically() {
        // "180" sorts before "90" as a string; width() sorts numerically.
        let narrow = profile(1, 1, "90 x 35mm");
        let wide = profile(2, 1, "180 x 45mm");
        assert!(narrow.width() < wide.width());
    }

    // ============================================================
    // STORE INVARIANT TESTS
    // ============================================================

    #[test]
    fn test_store_rejects_duplicate_slug() {
        let store = CatalogStore::new();
        store.insert_category(category(1, "Timber", None)).unwrap();

        let mut clash = category(2, "TIMBER", None);
        clash.slug = "timber".to_string();
        assert!(store.insert_category(clash).is_err());
    }

    #[test]
    fn test_store_rejects_unknown_or_self_parent() {
        let store = CatalogStore::new();
        assert!(store.insert_category(category(1, "Timber", Some(99))).is_err());
        assert!(store.insert_category(category(1, "Timber", Some(1))).is_err());
    }

    #[test]
    fn test_store_rejects_duplicate_in_number() {
        let store = CatalogStore::new();
        store.insert_category(category(1, "Timber", None)).unwrap();
        store
            .insert_product(product(1, ProductLink::Category(1), "", "IN001"))
            .unwrap();

        let err = store
            .insert_product(product(2, ProductLink::Category(1), "", "IN001"))
            .unwrap_err();
        assert!(err.to_string().contains("IN001"));
    }

    #[test]
    fn test_store_rejects_dangling_links() {
        let store = CatalogStore::new();
        assert!(
            store
                .insert_profile(profile(1, 99, "90 x 35mm"))
                .is_err()
        );
        assert!(
            store
                .insert_product(product(1, ProductLink::Profile(99), "", "IN001"))
                .is_err()
        );
        assert!(
            store
                .insert_product(product(1, ProductLink::Category(99), "", "IN001"))
                .is_err()
        );
    }

    // ============================================================
    // LOADER TESTS
    // ============================================================

    #[test]
    fn test_parse_catalog_derives_missing_slug() {
        let store = parse_catalog(
            r#"{
                "categories": [
                    {"id": 1, "name": "Treated Pine"},
                    {"id": 2, "name": "Timber", "slug": "structural-timber"}
                ]
            }"#,
        )
        .unwrap();
        let snapshot = store.snapshot();

        assert_eq!(snapshot.category(1).unwrap().slug, "treated-pine");
        assert_eq!(snapshot.category(2).unwrap().slug, "structural-timber");
    }

    #[test]
    fn test_parse_catalog_folds_link_fields() {
        let store = parse_catalog(
            r#"{
                "categories": [{"id": 1, "name": "Timber"}],
                "profiles": [{"id": 7, "category": 1, "name": "90 x 35mm"}],
                "products": [
                    {"id": 1, "profile": 7, "option": "2.4m", "in_number": "IN001", "price": 9.5},
                    {"id": 2, "category": 1, "option": "Sleeper", "in_number": "IN002"}
                ]
            }"#,
        )
        .unwrap();
        let snapshot = store.snapshot();

        assert_eq!(snapshot.product(1).unwrap().link, ProductLink::Profile(7));
        assert_eq!(snapshot.product(1).unwrap().price, Some(9.5));
        assert_eq!(snapshot.product(2).unwrap().link, ProductLink::Category(1));
    }

    #[test]
    fn test_parse_catalog_rejects_both_links() {
        let err = parse_catalog(
            r#"{
                "categories": [{"id": 1, "name": "Timber"}],
                "profiles": [{"id": 7, "category": 1, "name": "90 x 35mm"}],
                "products": [
                    {"id": 1, "category": 1, "profile": 7, "option": "", "in_number": "IN001"}
                ]
            }"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_parse_catalog_rejects_missing_link() {
        let err = parse_catalog(
            r#"{
                "products": [{"id": 1, "option": "", "in_number": "IN001"}]
            }"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("neither"));
    }

    #[test]
    fn test_parse_catalog_surfaces_referential_errors() {
        let err = parse_catalog(
            r#"{
                "profiles": [{"id": 7, "category": 42, "name": "90 x 35mm"}]
            }"#,
        )
        .unwrap_err();

        // The context names the failing entity.
        assert!(format!("{:#}", err).contains("profile 7"));
    }

    #[test]
    fn test_parse_catalog_rejects_invalid_json() {
        assert!(parse_catalog("not json").is_err());
    }

    // ============================================================
    // HANDLER TESTS
    // ============================================================

    use crate::catalog::handlers::{
        handle_category_detail, handle_product_detail, handle_profile_resolution,
    };
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::{Extension, Json};
    use std::sync::Arc;

    fn browse_store() -> Arc<CatalogStore> {
        let store = CatalogStore::new();
        store.insert_category(category(1, "Timber", None)).unwrap();
        store.insert_profile(profile(1, 1, "180 x 45mm")).unwrap();
        store.insert_profile(profile(2, 1, "90 x 35mm")).unwrap();
        store
            .insert_product(product(1, ProductLink::Profile(2), "3.0m", "IN001"))
            .unwrap();
        store
            .insert_product(product(2, ProductLink::Profile(2), "2.4m", "IN002"))
            .unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_category_detail_sorts_profiles_by_width() {
        let store = browse_store();

        let (status, Json(body)) =
            handle_category_detail(Path("timber".to_string()), Extension(store)).await;
        assert_eq!(status, StatusCode::OK);

        let detail = body.unwrap();
        let names: Vec<&str> = detail.profiles.iter().map(|p| p.name.as_str()).collect();
        // Numeric width order, not lexicographic name order.
        assert_eq!(names, vec!["90 x 35mm", "180 x 45mm"]);
    }

    #[tokio::test]
    async fn test_category_detail_unknown_slug_is_not_found() {
        let store = browse_store();

        let (status, Json(body)) =
            handle_category_detail(Path("missing".to_string()), Extension(store)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_profile_resolution_picks_first_product() {
        let store = browse_store();

        let (status, Json(body)) =
            handle_profile_resolution(Path(2), Extension(store.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap().product_id, Some(1));

        // A profile without products falls back to its category slug.
        let (_, Json(body)) = handle_profile_resolution(Path(1), Extension(store)).await;
        let resolution = body.unwrap();
        assert_eq!(resolution.product_id, None);
        assert_eq!(resolution.category_slug, "timber");
    }

    #[tokio::test]
    async fn test_product_detail_orders_siblings_by_option() {
        let store = browse_store();

        let (status, Json(body)) = handle_product_detail(Path(1), Extension(store)).await;
        assert_eq!(status, StatusCode::OK);

        let detail = body.unwrap();
        assert_eq!(detail.product.name, "90 x 35mm");
        let options: Vec<&str> = detail
            .siblings
            .iter()
            .map(|s| s.option.as_str())
            .collect();
        assert_eq!(options, vec!["2.4m", "3.0m"]);
    }
}
