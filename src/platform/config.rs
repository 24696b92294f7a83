// FleetDex - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for FleetDex data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/fleetdex/ or %APPDATA%\FleetDex\)
    pub config_dir: PathBuf,

    /// User dataset directory (e.g. ~/.config/fleetdex/datasets/)
    pub user_datasets_dir: PathBuf,

    /// Data directory for the session file.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            // Datasets live one level above config/ so the user-visible path is
            // %APPDATA%\FleetDex\datasets\ rather than the deeper
            // %APPDATA%\FleetDex\config\datasets\.
            let user_datasets_dir = config_dir
                .parent()
                .unwrap_or(&config_dir)
                .join(constants::DATASETS_DIR_NAME);
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                datasets = %user_datasets_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                user_datasets_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                user_datasets_dir: fallback.join(constants::DATASETS_DIR_NAME),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[catalog]` section.
    pub catalog: CatalogSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[catalog]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Additional dataset directory (overrides the platform default).
    pub user_dataset_directory: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Rows printed per table page.
    pub page_size: Option<usize>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Warn before exporting this many records.
    pub large_export_warning_threshold: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time. Invalid
/// values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Catalog --
    /// Dataset directory override from config (None = platform default).
    pub user_dataset_directory: Option<PathBuf>,

    // -- UI --
    /// Rows printed per table page.
    pub page_size: usize,

    // -- Export --
    /// Warn before exporting this many records.
    pub large_export_warning_threshold: usize,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_dataset_directory: None,
            page_size: constants::DEFAULT_PAGE_SIZE,
            large_export_warning_threshold: constants::DEFAULT_LARGE_EXPORT_THRESHOLD,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning --
/// the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir
        .parent()
        .unwrap_or(config_dir)
        .join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all errors.
    let mut config = AppConfig::default();

    // -- Catalog: user_dataset_directory --
    if let Some(ref dir) = raw.catalog.user_dataset_directory {
        if dir.is_empty() {
            warnings.push(
                "[catalog] user_dataset_directory is empty. Using platform default.".to_string(),
            );
        } else {
            config.user_dataset_directory = Some(PathBuf::from(dir));
        }
    }

    // -- UI: page_size --
    if let Some(size) = raw.ui.page_size {
        if (constants::MIN_PAGE_SIZE..=constants::MAX_PAGE_SIZE).contains(&size) {
            config.page_size = size;
        } else {
            warnings.push(format!(
                "[ui] page_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_PAGE_SIZE,
                constants::MAX_PAGE_SIZE,
                constants::DEFAULT_PAGE_SIZE,
            ));
        }
    }

    // -- Export: large_export_warning_threshold --
    if let Some(threshold) = raw.export.large_export_warning_threshold {
        if (1..=constants::MAX_EXPORT_RECORDS).contains(&threshold) {
            config.large_export_warning_threshold = threshold;
        } else {
            warnings.push(format!(
                "[export] large_export_warning_threshold = {threshold} is out of range (1-{}). \
                 Using default ({}).",
                constants::MAX_EXPORT_RECORDS,
                constants::DEFAULT_LARGE_EXPORT_THRESHOLD,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}
