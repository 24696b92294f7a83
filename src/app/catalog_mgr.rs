// FleetDex - app/catalog_mgr.rs
//
// Manages loading of directory datasets from both built-in sources
// (embedded in the binary) and user-defined TOML files on disk.
// User records override built-in records with the same id.

use crate::core::catalog::{self, DatasetRecords};
use crate::core::model::{BrandRecord, Catalog, LocationRecord};
use crate::util::constants;
use crate::util::error::CatalogError;
use std::path::Path;

/// Load the full catalog: built-in datasets first, then user overrides.
///
/// A user record with the same id as a built-in record replaces it; other
/// user records are appended in file order. Invalid files are logged and
/// skipped (non-fatal).
///
/// Returns the merged catalog and any non-fatal errors encountered.
pub fn load_catalog(user_dataset_dir: Option<&Path>) -> (Catalog, Vec<CatalogError>) {
    let mut catalog = Catalog::default();
    let mut errors = Vec::new();

    for dataset in catalog::load_builtin_datasets() {
        merge_dataset(&mut catalog, dataset.records);
    }

    tracing::info!(
        locations = catalog.locations.len(),
        brands = catalog.brands.len(),
        "Loaded built-in datasets"
    );

    // Merge user-defined datasets if the directory exists
    if let Some(dir) = user_dataset_dir {
        if dir.is_dir() {
            let (user_datasets, user_errors) = load_user_datasets(dir);
            errors.extend(user_errors);

            for dataset in user_datasets {
                tracing::info!(
                    kind = %dataset.kind,
                    name = %dataset.name,
                    records = dataset.records.len(),
                    "Merging user-defined dataset"
                );
                merge_dataset(&mut catalog, dataset.records);
            }
        } else {
            tracing::debug!(
                dir = %dir.display(),
                "User dataset directory does not exist (skipping)"
            );
        }
    }

    // Enforce maximum record counts after the merge
    if catalog.locations.len() > constants::MAX_CATALOG_RECORDS {
        tracing::warn!(
            count = catalog.locations.len(),
            max = constants::MAX_CATALOG_RECORDS,
            "Too many location records, truncating"
        );
        errors.push(CatalogError::TooManyRecords {
            count: catalog.locations.len(),
            max: constants::MAX_CATALOG_RECORDS,
        });
        catalog.locations.truncate(constants::MAX_CATALOG_RECORDS);
    }
    if catalog.brands.len() > constants::MAX_CATALOG_RECORDS {
        tracing::warn!(
            count = catalog.brands.len(),
            max = constants::MAX_CATALOG_RECORDS,
            "Too many brand records, truncating"
        );
        errors.push(CatalogError::TooManyRecords {
            count: catalog.brands.len(),
            max: constants::MAX_CATALOG_RECORDS,
        });
        catalog.brands.truncate(constants::MAX_CATALOG_RECORDS);
    }

    tracing::info!(
        locations = catalog.locations.len(),
        brands = catalog.brands.len(),
        "Catalog loading complete"
    );

    (catalog, errors)
}

/// Merge one dataset's records into the catalog.
///
/// Same-id records replace the existing entry in place (keeping its
/// position, so dataset order stays stable); new ids are appended.
fn merge_dataset(catalog: &mut Catalog, records: DatasetRecords) {
    match records {
        DatasetRecords::Locations(locations) => {
            for location in locations {
                merge_location(&mut catalog.locations, location);
            }
        }
        DatasetRecords::Brands(brands) => {
            for brand in brands {
                merge_brand(&mut catalog.brands, brand);
            }
        }
    }
}

fn merge_location(existing: &mut Vec<LocationRecord>, record: LocationRecord) {
    if let Some(pos) = existing.iter().position(|l| l.id == record.id) {
        tracing::debug!(id = %record.id, "User location overrides built-in");
        existing[pos] = record;
    } else {
        existing.push(record);
    }
}

fn merge_brand(existing: &mut Vec<BrandRecord>, record: BrandRecord) {
    if let Some(pos) = existing.iter().position(|b| b.id == record.id) {
        tracing::debug!(id = %record.id, "User brand overrides built-in");
        existing[pos] = record;
    } else {
        existing.push(record);
    }
}

/// Load user-defined datasets from a directory.
fn load_user_datasets(dir: &Path) -> (Vec<catalog::Dataset>, Vec<CatalogError>) {
    let mut datasets = Vec::new();
    let mut errors = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(CatalogError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
            return (datasets, errors);
        }
    };

    // Deterministic merge order regardless of directory iteration order
    let mut paths: Vec<_> = Vec::new();
    for entry_result in entries {
        match entry_result {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => {
                errors.push(CatalogError::Io {
                    path: dir.to_path_buf(),
                    source: e,
                });
            }
        }
    }
    paths.sort();

    for path in paths {
        // Only process .toml files
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }

        // Check file size
        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                errors.push(CatalogError::Io {
                    path: path.clone(),
                    source: e,
                });
                continue;
            }
        };

        if metadata.len() > constants::MAX_DATASET_FILE_SIZE {
            errors.push(CatalogError::FileTooLarge {
                path: path.clone(),
                size: metadata.len(),
                max_size: constants::MAX_DATASET_FILE_SIZE,
            });
            continue;
        }

        // Read and parse the dataset
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                errors.push(CatalogError::Io {
                    path: path.clone(),
                    source: e,
                });
                continue;
            }
        };

        match catalog::parse_dataset_toml(&content, &path)
            .and_then(|raw| catalog::validate_and_compile(raw, &path, false))
        {
            Ok(dataset) => datasets.push(dataset),
            Err(e) => errors.push(e),
        }
    }

    (datasets, errors)
}
