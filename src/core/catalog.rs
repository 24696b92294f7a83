// FleetDex - core/catalog.rs
//
// Dataset loading, validation, and compilation into runtime records.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::catalog_mgr which feeds content here.

use crate::core::model::{BrandRecord, CatalogKind, LocationRecord};
use crate::util::constants;
use crate::util::error::CatalogError;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw TOML dataset as deserialized from a .toml file.
/// This is validated and compiled into a `Dataset` for runtime use.
#[derive(Debug)]
pub struct RawDataset {
    pub meta: DatasetMeta,
    pub kind: CatalogKind,
    pub records: RawRecords,
}

/// Record tables of a raw dataset, keyed by the declared kind.
#[derive(Debug)]
pub enum RawRecords {
    Locations(Vec<RawLocation>),
    Brands(Vec<RawBrand>),
}

/// `[dataset]` header table.
#[derive(Debug, serde::Deserialize)]
pub struct DatasetMeta {
    /// "locations" or "brands"; decides which record table is read.
    pub kind: String,
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

#[derive(Debug, serde::Deserialize)]
struct DatasetHeader {
    dataset: DatasetMeta,
}

#[derive(Debug, serde::Deserialize)]
struct LocationsFile {
    #[allow(dead_code)]
    dataset: DatasetMeta,
    #[serde(default)]
    locations: Vec<RawLocation>,
}

#[derive(Debug, serde::Deserialize)]
struct BrandsFile {
    #[allow(dead_code)]
    dataset: DatasetMeta,
    #[serde(default)]
    brands: Vec<RawBrand>,
}

/// `[[locations]]` entry before validation.
#[derive(Debug, serde::Deserialize)]
pub struct RawLocation {
    pub id: String,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub vehicle_count: usize,
    #[serde(default)]
    pub service_count: usize,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub featured: bool,
}

/// `[[brands]]` entry before validation.
#[derive(Debug, serde::Deserialize)]
pub struct RawBrand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub vehicle_count: usize,
    #[serde(default)]
    pub rating: f32,
    pub established: u16,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub featured: bool,
}

// =============================================================================
// Compiled dataset (runtime representation)
// =============================================================================

/// A validated dataset ready to be merged into the catalog.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Kind declared in the `[dataset]` header.
    pub kind: CatalogKind,

    /// Human-readable dataset name (e.g. "Built-in locations").
    pub name: String,

    /// Dataset schema version.
    pub version: String,

    /// Whether this dataset ships embedded in the binary.
    pub is_builtin: bool,

    /// The validated records.
    pub records: DatasetRecords,
}

/// Validated records of a dataset, in file order.
#[derive(Debug, Clone)]
pub enum DatasetRecords {
    Locations(Vec<LocationRecord>),
    Brands(Vec<BrandRecord>),
}

impl DatasetRecords {
    pub fn len(&self) -> usize {
        match self {
            Self::Locations(v) => v.len(),
            Self::Brands(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse a TOML string into a `RawDataset`.
///
/// The `[dataset] kind` header decides whether `[[locations]]` or
/// `[[brands]]` tables are read. `source_path` is used for error messages
/// only (not for I/O).
pub fn parse_dataset_toml(
    toml_content: &str,
    source_path: &Path,
) -> Result<RawDataset, CatalogError> {
    let header: DatasetHeader =
        toml::from_str(toml_content).map_err(|e| CatalogError::TomlParse {
            path: source_path.to_path_buf(),
            source: e,
        })?;

    match header.dataset.kind.as_str() {
        "locations" => {
            let file: LocationsFile =
                toml::from_str(toml_content).map_err(|e| CatalogError::TomlParse {
                    path: source_path.to_path_buf(),
                    source: e,
                })?;
            Ok(RawDataset {
                meta: header.dataset,
                kind: CatalogKind::Locations,
                records: RawRecords::Locations(file.locations),
            })
        }
        "brands" => {
            let file: BrandsFile =
                toml::from_str(toml_content).map_err(|e| CatalogError::TomlParse {
                    path: source_path.to_path_buf(),
                    source: e,
                })?;
            Ok(RawDataset {
                meta: header.dataset,
                kind: CatalogKind::Brands,
                records: RawRecords::Brands(file.brands),
            })
        }
        other => Err(CatalogError::UnknownKind {
            path: source_path.to_path_buf(),
            kind: other.to_string(),
        }),
    }
}

// =============================================================================
// Validation and compilation
// =============================================================================

/// Validate a `RawDataset` and compile it into a runtime `Dataset`.
///
/// Validates:
/// - ids are non-empty slugs, unique within the file
/// - names and selector keys (city/category) are non-empty
/// - ratings are within [RATING_MIN, RATING_MAX]
/// - brand `established` years are within the plausible range
/// - the record count is within MAX_CATALOG_RECORDS
pub fn validate_and_compile(
    raw: RawDataset,
    source_path: &Path,
    is_builtin: bool,
) -> Result<Dataset, CatalogError> {
    if raw.records_len() > constants::MAX_CATALOG_RECORDS {
        return Err(CatalogError::TooManyRecords {
            count: raw.records_len(),
            max: constants::MAX_CATALOG_RECORDS,
        });
    }

    let mut seen_ids: HashSet<String> = HashSet::new();

    let records = match raw.records {
        RawRecords::Locations(raw_locations) => {
            let mut locations = Vec::with_capacity(raw_locations.len());
            for raw_loc in raw_locations {
                let loc = compile_location(raw_loc)?;
                if !seen_ids.insert(loc.id.clone()) {
                    return Err(CatalogError::DuplicateId {
                        id: loc.id,
                        path: source_path.to_path_buf(),
                    });
                }
                locations.push(loc);
            }
            DatasetRecords::Locations(locations)
        }
        RawRecords::Brands(raw_brands) => {
            let mut brands = Vec::with_capacity(raw_brands.len());
            for raw_brand in raw_brands {
                let brand = compile_brand(raw_brand)?;
                if !seen_ids.insert(brand.id.clone()) {
                    return Err(CatalogError::DuplicateId {
                        id: brand.id,
                        path: source_path.to_path_buf(),
                    });
                }
                brands.push(brand);
            }
            DatasetRecords::Brands(brands)
        }
    };

    Ok(Dataset {
        kind: raw.kind,
        name: raw.meta.name,
        version: raw.meta.version,
        is_builtin,
        records,
    })
}

impl RawDataset {
    fn records_len(&self) -> usize {
        match &self.records {
            RawRecords::Locations(v) => v.len(),
            RawRecords::Brands(v) => v.len(),
        }
    }
}

fn compile_location(raw: RawLocation) -> Result<LocationRecord, CatalogError> {
    validate_id(&raw.id)?;
    require_field(&raw.id, "name", &raw.name)?;
    require_field(&raw.id, "city", &raw.city)?;
    validate_rating(&raw.id, raw.rating)?;

    Ok(LocationRecord {
        id: raw.id,
        name: raw.name,
        city: raw.city,
        image: raw.image,
        vehicle_count: raw.vehicle_count,
        service_count: raw.service_count,
        rating: raw.rating,
        trending: raw.trending,
        featured: raw.featured,
    })
}

fn compile_brand(raw: RawBrand) -> Result<BrandRecord, CatalogError> {
    validate_id(&raw.id)?;
    require_field(&raw.id, "name", &raw.name)?;
    require_field(&raw.id, "category", &raw.category)?;
    validate_rating(&raw.id, raw.rating)?;

    if !(constants::MIN_ESTABLISHED_YEAR..=constants::MAX_ESTABLISHED_YEAR)
        .contains(&raw.established)
    {
        return Err(CatalogError::ValueOutOfRange {
            record_id: raw.id,
            field: "established",
            value: raw.established.to_string(),
            expected: format!(
                "{}-{}",
                constants::MIN_ESTABLISHED_YEAR,
                constants::MAX_ESTABLISHED_YEAR
            ),
        });
    }

    Ok(BrandRecord {
        id: raw.id,
        name: raw.name,
        logo: raw.logo,
        description: raw.description,
        category: raw.category,
        vehicle_count: raw.vehicle_count,
        rating: raw.rating,
        established: raw.established,
        country: raw.country,
        featured: raw.featured,
    })
}

fn require_field(
    record_id: &str,
    field: &'static str,
    value: &str,
) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::MissingField {
            record_id: record_id.to_string(),
            field,
        });
    }
    Ok(())
}

fn validate_id(id: &str) -> Result<(), CatalogError> {
    if id.is_empty() || !id_pattern().is_match(id) {
        return Err(CatalogError::InvalidId { id: id.to_string() });
    }
    Ok(())
}

fn validate_rating(record_id: &str, rating: f32) -> Result<(), CatalogError> {
    if !(constants::RATING_MIN..=constants::RATING_MAX).contains(&rating) {
        return Err(CatalogError::ValueOutOfRange {
            record_id: record_id.to_string(),
            field: "rating",
            value: rating.to_string(),
            expected: format!("{:.1}-{:.1}", constants::RATING_MIN, constants::RATING_MAX),
        });
    }
    Ok(())
}

/// Compiled slug pattern, built once for the process lifetime.
fn id_pattern() -> &'static Regex {
    static ID_REGEX: OnceLock<Regex> = OnceLock::new();
    // The pattern is a compile-time constant; a failure here is a build bug.
    ID_REGEX.get_or_init(|| Regex::new(constants::ID_PATTERN).expect("ID_PATTERN must compile"))
}

// =============================================================================
// Built-in datasets (embedded at compile time)
// =============================================================================

/// Embedded TOML content for the built-in datasets.
/// Each tuple is (filename, TOML content).
pub fn builtin_dataset_sources() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "locations.toml",
            include_str!("../../datasets/locations.toml"),
        ),
        ("brands.toml", include_str!("../../datasets/brands.toml")),
    ]
}

/// Load and validate all built-in datasets.
///
/// Invalid datasets are logged as errors and skipped (non-fatal).
/// Returns the successfully loaded datasets.
pub fn load_builtin_datasets() -> Vec<Dataset> {
    let mut datasets = Vec::new();

    for (filename, content) in builtin_dataset_sources() {
        let path = PathBuf::from(format!("<builtin>/{filename}"));
        match parse_dataset_toml(content, &path)
            .and_then(|raw| validate_and_compile(raw, &path, true))
        {
            Ok(dataset) => {
                tracing::debug!(
                    kind = %dataset.kind,
                    records = dataset.records.len(),
                    "Loaded built-in dataset"
                );
                datasets.push(dataset);
            }
            Err(e) => {
                // Built-in dataset failures are bugs, but degrade gracefully
                tracing::error!(file = filename, error = %e, "Failed to load built-in dataset");
            }
        }
    }

    datasets
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_LOCATIONS_TOML: &str = r#"
[dataset]
kind = "locations"
name = "Test locations"
version = "1.0"

[[locations]]
id = "downtown-dubai"
name = "Downtown Dubai"
city = "Dubai"
image = "locations/downtown-dubai.jpg"
vehicle_count = 120
service_count = 8
rating = 4.8
trending = true
featured = true

[[locations]]
id = "corniche"
name = "Corniche"
city = "Abu Dhabi"
rating = 4.5
"#;

    const VALID_BRANDS_TOML: &str = r#"
[dataset]
kind = "brands"
name = "Test brands"

[[brands]]
id = "mercedes-benz"
name = "Mercedes-Benz"
category = "luxury"
vehicle_count = 85
rating = 4.9
established = 1926
country = "Germany"
featured = true
"#;

    #[test]
    fn test_parse_valid_locations_dataset() {
        let path = PathBuf::from("test.toml");
        let raw = parse_dataset_toml(VALID_LOCATIONS_TOML, &path).unwrap();
        assert_eq!(raw.kind, CatalogKind::Locations);
        assert_eq!(raw.meta.name, "Test locations");
        match &raw.records {
            RawRecords::Locations(locs) => assert_eq!(locs.len(), 2),
            other => panic!("Expected locations, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_valid_locations_dataset() {
        let path = PathBuf::from("test.toml");
        let raw = parse_dataset_toml(VALID_LOCATIONS_TOML, &path).unwrap();
        let dataset = validate_and_compile(raw, &path, false).unwrap();

        assert_eq!(dataset.kind, CatalogKind::Locations);
        assert!(!dataset.is_builtin);
        match dataset.records {
            DatasetRecords::Locations(locs) => {
                assert_eq!(locs[0].id, "downtown-dubai");
                assert_eq!(locs[0].vehicle_count, 120);
                assert!(locs[0].trending);
                // Optional fields default when omitted
                assert_eq!(locs[1].vehicle_count, 0);
                assert!(!locs[1].featured);
            }
            other => panic!("Expected locations, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_valid_brands_dataset() {
        let path = PathBuf::from("test.toml");
        let raw = parse_dataset_toml(VALID_BRANDS_TOML, &path).unwrap();
        let dataset = validate_and_compile(raw, &path, false).unwrap();

        match dataset.records {
            DatasetRecords::Brands(brands) => {
                assert_eq!(brands[0].name, "Mercedes-Benz");
                assert_eq!(brands[0].established, 1926);
                assert_eq!(brands[0].category, "luxury");
            }
            other => panic!("Expected brands, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let toml = r#"
[dataset]
kind = "vehicles"
name = "Bad kind"
"#;
        let path = PathBuf::from("bad.toml");
        let result = parse_dataset_toml(toml, &path);
        assert!(matches!(result, Err(CatalogError::UnknownKind { .. })));
    }

    #[test]
    fn test_missing_city_is_rejected() {
        let toml = r#"
[dataset]
kind = "locations"
name = "Missing city"

[[locations]]
id = "marina"
name = "Marina"
city = ""
"#;
        let path = PathBuf::from("bad.toml");
        let raw = parse_dataset_toml(toml, &path).unwrap();
        let result = validate_and_compile(raw, &path, false);
        match result.unwrap_err() {
            CatalogError::MissingField { field, .. } => assert_eq!(field, "city"),
            other => panic!("Expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let toml = r#"
[dataset]
kind = "locations"
name = "Bad id"

[[locations]]
id = "Downtown Dubai"
name = "Downtown Dubai"
city = "Dubai"
"#;
        let path = PathBuf::from("bad.toml");
        let raw = parse_dataset_toml(toml, &path).unwrap();
        let result = validate_and_compile(raw, &path, false);
        assert!(matches!(result, Err(CatalogError::InvalidId { .. })));
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let toml = r#"
[dataset]
kind = "locations"
name = "Bad rating"

[[locations]]
id = "marina"
name = "Marina"
city = "Dubai"
rating = 5.5
"#;
        let path = PathBuf::from("bad.toml");
        let raw = parse_dataset_toml(toml, &path).unwrap();
        let result = validate_and_compile(raw, &path, false);
        match result.unwrap_err() {
            CatalogError::ValueOutOfRange { field, .. } => assert_eq!(field, "rating"),
            other => panic!("Expected ValueOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_established_out_of_range_is_rejected() {
        let toml = r#"
[dataset]
kind = "brands"
name = "Bad year"

[[brands]]
id = "oldtimer"
name = "Oldtimer"
category = "luxury"
established = 1850
"#;
        let path = PathBuf::from("bad.toml");
        let raw = parse_dataset_toml(toml, &path).unwrap();
        let result = validate_and_compile(raw, &path, false);
        match result.unwrap_err() {
            CatalogError::ValueOutOfRange { field, .. } => assert_eq!(field, "established"),
            other => panic!("Expected ValueOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let toml = r#"
[dataset]
kind = "locations"
name = "Duplicates"

[[locations]]
id = "marina"
name = "Marina"
city = "Dubai"

[[locations]]
id = "marina"
name = "Marina Walk"
city = "Dubai"
"#;
        let path = PathBuf::from("bad.toml");
        let raw = parse_dataset_toml(toml, &path).unwrap();
        let result = validate_and_compile(raw, &path, false);
        match result.unwrap_err() {
            CatalogError::DuplicateId { id, .. } => assert_eq!(id, "marina"),
            other => panic!("Expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn test_load_builtin_datasets() {
        let datasets = load_builtin_datasets();
        assert_eq!(datasets.len(), 2, "Both built-in datasets should load");
        assert!(datasets.iter().all(|d| d.is_builtin));
        assert!(datasets
            .iter()
            .any(|d| d.kind == CatalogKind::Locations && !d.records.is_empty()));
        assert!(datasets
            .iter()
            .any(|d| d.kind == CatalogKind::Brands && !d.records.is_empty()));
    }
}
