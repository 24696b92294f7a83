// FleetDex - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors keep the causal chain
// for diagnostic logging.
//
// Filtering itself has no error variants: an empty result set is a valid,
// displayable state, not a failure.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all FleetDex operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum FleetDexError {
    /// Dataset loading or validation failed.
    Catalog(CatalogError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for FleetDexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "Catalog error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for FleetDexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors related to dataset loading and validation.
#[derive(Debug)]
pub enum CatalogError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Dataset file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is missing or empty in a record definition.
    MissingField {
        record_id: String,
        field: &'static str,
    },

    /// A record id does not match the slug pattern.
    InvalidId { id: String },

    /// A numeric field is outside its allowed range.
    ValueOutOfRange {
        record_id: String,
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Two records in the same dataset file share an id (a user record
    /// overriding a built-in is fine; duplicates within one file are not).
    DuplicateId { id: String, path: PathBuf },

    /// The dataset header declares a kind this build does not know.
    UnknownKind { path: PathBuf, kind: String },

    /// Maximum record count exceeded.
    TooManyRecords { count: usize, max: usize },

    /// I/O error reading a dataset file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Dataset '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { record_id, field } => {
                write!(f, "Record '{record_id}': missing required field '{field}'")
            }
            Self::InvalidId { id } => {
                write!(
                    f,
                    "Record id '{id}' is not a valid slug \
                     (lowercase letters, digits, and single hyphens)"
                )
            }
            Self::ValueOutOfRange {
                record_id,
                field,
                value,
                expected,
            } => write!(
                f,
                "Record '{record_id}': {field} = {value} is out of range. Expected: {expected}"
            ),
            Self::DuplicateId { id, path } => write!(
                f,
                "Duplicate record id '{id}' in '{}'",
                path.display()
            ),
            Self::UnknownKind { path, kind } => write!(
                f,
                "Dataset '{}' declares unknown kind '{kind}'. \
                 Expected \"locations\" or \"brands\".",
                path.display()
            ),
            Self::TooManyRecords { count, max } => {
                write!(f, "Too many records loaded ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading dataset '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for FleetDexError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum record count.
    TooManyRecords { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyRecords { count, max } => write!(
                f,
                "Export of {count} records exceeds maximum of {max}. \
                 Narrow the filter to reduce the result set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for FleetDexError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for FleetDexError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for FleetDex results.
pub type Result<T> = std::result::Result<T, FleetDexError>;
