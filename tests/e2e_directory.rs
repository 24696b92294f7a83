// FleetDex - tests/e2e_directory.rs
//
// End-to-end tests for the catalog and filter pipeline.
//
// These tests exercise the real embedded datasets, real TOML parsing and
// validation, real user-dataset merging from disk, and real export output —
// no mocks, no stubs. This is the full path from a dataset file to the
// filtered, rendered-or-exported record sequence.

use fleetdex::app::catalog_mgr;
use fleetdex::app::state::AppState;
use fleetdex::core::export;
use fleetdex::core::filter::{apply_filter, FilterCriteria, Selector};
use fleetdex::core::model::{Catalog, CatalogKind, DirectoryRecord};
use std::fs;
use std::path::Path;

// =============================================================================
// Helpers
// =============================================================================

/// Load the built-in catalog, asserting a clean load.
fn builtin_catalog() -> Catalog {
    let (catalog, errors) = catalog_mgr::load_catalog(None);
    assert!(errors.is_empty(), "unexpected load errors: {errors:?}");
    catalog
}

// =============================================================================
// Catalog loading E2E
// =============================================================================

/// The embedded datasets must load with no errors and sane shapes.
#[test]
fn e2e_builtin_catalog_loads_clean() {
    let catalog = builtin_catalog();

    assert!(catalog.locations.len() >= 10);
    assert!(catalog.brands.len() >= 10);

    // Every record honours the validation invariants it was loaded under.
    for loc in &catalog.locations {
        assert!(!loc.id.is_empty());
        assert!(!loc.name.is_empty());
        assert!(!loc.city.is_empty());
        assert!((0.0..=5.0).contains(&loc.rating), "rating for {}", loc.id);
    }
    for brand in &catalog.brands {
        assert!(!brand.category.is_empty());
        assert!(
            (1886..=2100).contains(&brand.established),
            "established for {}",
            brand.id
        );
    }
}

/// Record ids are unique across each directory after the merge.
#[test]
fn e2e_catalog_ids_are_unique() {
    let catalog = builtin_catalog();

    let mut location_ids: Vec<_> = catalog.locations.iter().map(|l| l.id.clone()).collect();
    location_ids.sort();
    location_ids.dedup();
    assert_eq!(location_ids.len(), catalog.locations.len());

    let mut brand_ids: Vec<_> = catalog.brands.iter().map(|b| b.id.clone()).collect();
    brand_ids.sort();
    brand_ids.dedup();
    assert_eq!(brand_ids.len(), catalog.brands.len());
}

/// A user dataset on disk overrides a built-in record and appends a new one.
#[test]
fn e2e_user_dataset_merge_from_disk() {
    let builtin = builtin_catalog();

    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("my-sites.toml"),
        r#"
[dataset]
kind = "locations"
name = "My sites"

[[locations]]
id = "downtown-dubai"
name = "Downtown Dubai (Valet)"
city = "Dubai"
vehicle_count = 7
rating = 4.0

[[locations]]
id = "hatta-wadi-hub"
name = "Hatta Wadi Hub"
city = "Dubai"
vehicle_count = 9
rating = 4.1
"#,
    )
    .unwrap();

    let (catalog, errors) = catalog_mgr::load_catalog(Some(dir.path()));
    assert!(errors.is_empty(), "unexpected load errors: {errors:?}");

    // Override kept its dataset position; append went to the end.
    assert_eq!(catalog.locations.len(), builtin.locations.len() + 1);
    let overridden = catalog
        .locations
        .iter()
        .find(|l| l.id == "downtown-dubai")
        .expect("overridden record present");
    assert_eq!(overridden.name, "Downtown Dubai (Valet)");
    assert_eq!(overridden.vehicle_count, 7);
    assert_eq!(
        catalog.locations.last().map(|l| l.id.as_str()),
        Some("hatta-wadi-hub")
    );
}

// =============================================================================
// Filter contract E2E (over the real datasets)
// =============================================================================

/// Unconstrained criteria return the full directory in dataset order.
#[test]
fn e2e_identity_filter_returns_full_directory() {
    let catalog = builtin_catalog();
    let indices = apply_filter(&catalog.locations, &FilterCriteria::default());
    let expected: Vec<usize> = (0..catalog.locations.len()).collect();
    assert_eq!(indices, expected);
}

/// The result is always a subsequence: strictly increasing indices, and
/// exactly the records satisfying both predicates.
#[test]
fn e2e_filter_result_is_exact_subsequence() {
    let catalog = builtin_catalog();
    let criteria = FilterCriteria {
        query: "dubai".to_string(),
        selector: Selector::parse("Dubai"),
        ..Default::default()
    };
    let indices = apply_filter(&catalog.locations, &criteria);

    assert!(!indices.is_empty());
    assert!(indices.windows(2).all(|w| w[0] < w[1]));

    for (idx, loc) in catalog.locations.iter().enumerate() {
        let matches = loc.city == "Dubai"
            && (loc.name.to_lowercase().contains("dubai")
                || loc.city.to_lowercase().contains("dubai"));
        assert_eq!(
            indices.contains(&idx),
            matches,
            "membership mismatch for {}",
            loc.id
        );
    }
}

/// Query case never changes the result.
#[test]
fn e2e_query_case_insensitive_on_real_data() {
    let catalog = builtin_catalog();
    for query in ["marina", "MARINA", "MaRiNa"] {
        let criteria = FilterCriteria {
            query: query.to_string(),
            ..Default::default()
        };
        let indices = apply_filter(&catalog.locations, &criteria);
        assert_eq!(indices.len(), 1, "query {query:?}");
        assert_eq!(catalog.locations[indices[0]].id, "dubai-marina");
    }
}

/// Selector equality is case-sensitive; the sentinel is unconstrained.
#[test]
fn e2e_selector_semantics_on_real_data() {
    let catalog = builtin_catalog();

    let exact = FilterCriteria {
        selector: Selector::parse("Abu Dhabi"),
        ..Default::default()
    };
    let matched = apply_filter(&catalog.locations, &exact);
    assert!(!matched.is_empty());
    assert!(matched
        .iter()
        .all(|&i| catalog.locations[i].city == "Abu Dhabi"));

    let wrong_case = FilterCriteria {
        selector: Selector::parse("abu dhabi"),
        ..Default::default()
    };
    assert!(apply_filter(&catalog.locations, &wrong_case).is_empty());

    let sentinel = FilterCriteria {
        selector: Selector::parse("all"),
        ..Default::default()
    };
    assert_eq!(
        apply_filter(&catalog.locations, &sentinel).len(),
        catalog.locations.len()
    );
}

/// Filtering its own output with the same criteria is a fixpoint.
#[test]
fn e2e_filter_is_idempotent_on_real_data() {
    let catalog = builtin_catalog();
    let criteria = FilterCriteria {
        query: "a".to_string(),
        selector: Selector::parse("Dubai"),
        ..Default::default()
    };

    let once: Vec<_> = apply_filter(&catalog.brands, &criteria)
        .into_iter()
        .map(|i| catalog.brands[i].clone())
        .collect();
    let twice: Vec<_> = apply_filter(&once, &criteria)
        .into_iter()
        .map(|i| once[i].clone())
        .collect();
    assert_eq!(once, twice);
}

/// Brand queries match the category field as well as the name.
#[test]
fn e2e_brand_query_reaches_category() {
    let catalog = builtin_catalog();
    let criteria = FilterCriteria {
        query: "sports".to_string(),
        ..Default::default()
    };
    let indices = apply_filter(&catalog.brands, &criteria);
    assert!(!indices.is_empty());
    assert!(indices
        .iter()
        .all(|&i| catalog.brands[i].selector_key() == "sports"));
}

// =============================================================================
// State and export E2E
// =============================================================================

/// AppState drives the same engine and clear() restores the identity view.
#[test]
fn e2e_state_filter_and_clear() {
    let mut state = AppState::new(builtin_catalog(), CatalogKind::Brands);
    let total = state.view_len();
    assert_eq!(state.filtered_indices.len(), total);

    state.criteria.selector = Selector::parse("luxury");
    state.criteria.featured_only = true;
    state.apply_filter();
    let filtered = state.filtered_brands();
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|b| b.category == "luxury" && b.featured));

    state.clear();
    assert_eq!(state.filtered_indices.len(), total);
}

/// Filtered views export to CSV and JSON with one row/object per record.
#[test]
fn e2e_filtered_export_round() {
    let mut state = AppState::new(builtin_catalog(), CatalogKind::Locations);
    state.criteria.selector = Selector::parse("Abu Dhabi");
    state.apply_filter();
    let filtered = state.filtered_locations();
    assert!(!filtered.is_empty());

    let mut csv_buf = Vec::new();
    let count =
        export::export_locations_csv(&filtered, &mut csv_buf, Path::new("out.csv")).unwrap();
    assert_eq!(count, filtered.len());
    let csv_text = String::from_utf8(csv_buf).unwrap();
    // Header plus one line per record
    assert_eq!(csv_text.lines().count(), filtered.len() + 1);
    assert!(csv_text.contains("Abu Dhabi Corniche"));

    let mut json_buf = Vec::new();
    export::export_json(&filtered, &mut json_buf, Path::new("out.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&json_buf).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(filtered.len()));
}
