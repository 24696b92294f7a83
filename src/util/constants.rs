// FleetDex - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "FleetDex";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "FleetDex";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Catalog limits
// =============================================================================

/// Maximum size of a dataset TOML file in bytes.
pub const MAX_DATASET_FILE_SIZE: u64 = 256 * 1024; // 256 KB

/// Maximum number of records held in one catalog (locations or brands).
///
/// The directory is a curated reference list, not a bulk store; the cap
/// keeps a malformed user dataset from ballooning memory.
pub const MAX_CATALOG_RECORDS: usize = 10_000;

/// Record id pattern: lowercase slug segments joined by single hyphens.
pub const ID_PATTERN: &str = "^[a-z0-9]+(-[a-z0-9]+)*$";

/// Inclusive lower bound for a record rating.
pub const RATING_MIN: f32 = 0.0;

/// Inclusive upper bound for a record rating.
pub const RATING_MAX: f32 = 5.0;

/// Earliest plausible `established` year for a brand (Benz Patent-Motorwagen).
pub const MIN_ESTABLISHED_YEAR: u16 = 1886;

/// Latest accepted `established` year for a brand.
pub const MAX_ESTABLISHED_YEAR: u16 = 2100;

// =============================================================================
// Filter limits
// =============================================================================

/// Maximum length in characters of the free-text query. Longer input is
/// truncated rather than rejected; a query this long cannot match any
/// record name.
pub const MAX_QUERY_LENGTH: usize = 256;

/// Selector sentinel meaning "no city/category constraint".
pub const SELECTOR_ALL: &str = "all";

// =============================================================================
// UI defaults
// =============================================================================

/// Default number of rows printed per table page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Minimum user-configurable page size.
pub const MIN_PAGE_SIZE: usize = 1;

/// Maximum user-configurable page size.
pub const MAX_PAGE_SIZE: usize = 500;

/// Column width the record name is truncated to in table output.
pub const NAME_COLUMN_WIDTH: usize = 28;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of records that can be exported in a single operation.
pub const MAX_EXPORT_RECORDS: usize = 100_000;

/// Number of records above which an export warning is logged.
pub const DEFAULT_LARGE_EXPORT_THRESHOLD: usize = 5_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";

/// User datasets subdirectory name.
pub const DATASETS_DIR_NAME: &str = "datasets";
