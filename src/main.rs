// FleetDex - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Catalog loading (built-in + user-defined datasets)
// 4. Command dispatch: browse, summary, session reset

mod render;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use fleetdex::app::{catalog_mgr, session, state::AppState};
use fleetdex::core::export;
use fleetdex::core::filter::{FilterCriteria, Selector};
use fleetdex::core::model::CatalogKind;
use fleetdex::platform::config::{self, AppConfig, PlatformPaths};
use fleetdex::util::constants;
use fleetdex::util::error::{FleetDexError, Result};
use fleetdex::util::logging;

/// FleetDex - Catalog browser for a car-rental marketplace directory.
///
/// Browse, filter, and export the built-in location and brand directories,
/// optionally extended by user-defined dataset files.
#[derive(Parser, Debug)]
#[command(name = "FleetDex", version, about)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the rental locations directory.
    Locations {
        /// Free-text query matched against name and city (case-insensitive).
        query: Option<String>,

        /// Only locations in this city (case-sensitive; "all" = any).
        #[arg(short, long)]
        city: Option<String>,

        /// Only editorially featured locations.
        #[arg(long)]
        featured: bool,

        /// Only trending locations.
        #[arg(long)]
        trending: bool,

        /// Reuse the criteria from the previous run (other filter flags are
        /// ignored).
        #[arg(long)]
        last: bool,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write csv/json output to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse the vehicle brands directory.
    Brands {
        /// Free-text query matched against name and category (case-insensitive).
        query: Option<String>,

        /// Only brands in this category (case-sensitive; "all" = any).
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Only editorially featured brands.
        #[arg(long)]
        featured: bool,

        /// Reuse the criteria from the previous run (other filter flags are
        /// ignored).
        #[arg(long)]
        last: bool,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write csv/json output to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print statistics over the loaded catalog.
    Summary,

    /// Clear the saved search session.
    Reset,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() {
    let cli = Cli::parse();

    // Initialise logging subsystem
    logging::init(cli.debug, None);

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "FleetDex starting"
    );

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Resolve platform paths and configuration
    let platform_paths = PlatformPaths::resolve();
    let (app_config, config_warnings) = config::load_config(&platform_paths.config_dir);
    for warning in &config_warnings {
        eprintln!("Warning: {warning}");
    }

    let session_file = session::session_path(&platform_paths.data_dir);

    match cli.command {
        Command::Locations {
            query,
            city,
            featured,
            trending,
            last,
            format,
            output,
        } => {
            let criteria = resolve_criteria(
                CatalogKind::Locations,
                query,
                city,
                featured,
                trending,
                last,
                &session_file,
            );
            browse(
                CatalogKind::Locations,
                criteria,
                format,
                output,
                &app_config,
                &platform_paths,
                &session_file,
            )
        }
        Command::Brands {
            query,
            category,
            featured,
            last,
            format,
            output,
        } => {
            let criteria = resolve_criteria(
                CatalogKind::Brands,
                query,
                category,
                featured,
                false,
                last,
                &session_file,
            );
            browse(
                CatalogKind::Brands,
                criteria,
                format,
                output,
                &app_config,
                &platform_paths,
                &session_file,
            )
        }
        Command::Summary => {
            let catalog = load_catalog(&app_config, &platform_paths);
            render::print_summary(&catalog.summary());
            Ok(())
        }
        Command::Reset => {
            match session::clear(&session_file) {
                Ok(true) => println!("Saved search session cleared."),
                Ok(false) => println!("No saved search session."),
                Err(msg) => tracing::warn!(error = %msg, "Failed to clear session"),
            }
            Ok(())
        }
    }
}

/// Build filter criteria from CLI arguments, or from the saved session
/// when --last was passed.
fn resolve_criteria(
    kind: CatalogKind,
    query: Option<String>,
    selector: Option<String>,
    featured: bool,
    trending: bool,
    last: bool,
    session_file: &std::path::Path,
) -> FilterCriteria {
    if last {
        if let Some(data) = session::load(session_file) {
            let persisted = match kind {
                CatalogKind::Locations => &data.locations,
                CatalogKind::Brands => &data.brands,
            };
            tracing::info!(kind = %kind, "Reusing previous search criteria");
            return persisted.to_criteria();
        }
        tracing::warn!("No previous session found; using the given criteria");
    }

    let mut criteria = FilterCriteria {
        selector: selector
            .as_deref()
            .map(Selector::parse)
            .unwrap_or_default(),
        featured_only: featured,
        trending_only: trending,
        ..Default::default()
    };
    criteria.set_query(query.as_deref().unwrap_or(""));
    criteria
}

fn load_catalog(
    app_config: &AppConfig,
    platform_paths: &PlatformPaths,
) -> fleetdex::core::model::Catalog {
    // Config override wins over the platform default dataset directory
    let user_dir = app_config
        .user_dataset_directory
        .as_deref()
        .unwrap_or(&platform_paths.user_datasets_dir);

    let (catalog, errors) = catalog_mgr::load_catalog(Some(user_dir));
    for err in &errors {
        tracing::warn!(error = %err, "Dataset loading warning");
    }
    catalog
}

/// Filter a directory and print or export the result.
fn browse(
    kind: CatalogKind,
    criteria: FilterCriteria,
    format: OutputFormat,
    output: Option<PathBuf>,
    app_config: &AppConfig,
    platform_paths: &PlatformPaths,
    session_file: &std::path::Path,
) -> Result<()> {
    let catalog = load_catalog(app_config, platform_paths);

    let mut state = AppState::new(catalog, kind);
    state.criteria = criteria;
    state.apply_filter();

    tracing::debug!(
        kind = %kind,
        matched = state.filtered_indices.len(),
        total = state.view_len(),
        "Filter applied"
    );

    if state.filtered_indices.len() > app_config.large_export_warning_threshold
        && format != OutputFormat::Table
    {
        tracing::warn!(
            count = state.filtered_indices.len(),
            threshold = app_config.large_export_warning_threshold,
            "Large export"
        );
    }

    match format {
        OutputFormat::Table => match kind {
            CatalogKind::Locations => render::print_locations(
                &state.filtered_locations(),
                state.view_len(),
                app_config.page_size,
            ),
            CatalogKind::Brands => render::print_brands(
                &state.filtered_brands(),
                state.view_len(),
                app_config.page_size,
            ),
        },
        OutputFormat::Json | OutputFormat::Csv => {
            export_view(&state, kind, format, output.as_deref())?;
        }
    }

    save_session(kind, &state.criteria, session_file);
    Ok(())
}

/// Write the filtered view as CSV or JSON to a file or stdout.
fn export_view(
    state: &AppState,
    kind: CatalogKind,
    format: OutputFormat,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let (path, mut writer): (PathBuf, Box<dyn std::io::Write>) = match output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| FleetDexError::Io {
                path: path.to_path_buf(),
                operation: "create export file",
                source: e,
            })?;
            (path.to_path_buf(), Box::new(file))
        }
        None => (PathBuf::from("<stdout>"), Box::new(std::io::stdout())),
    };

    let count = match (kind, format) {
        (CatalogKind::Locations, OutputFormat::Csv) => {
            export::export_locations_csv(&state.filtered_locations(), &mut writer, &path)?
        }
        (CatalogKind::Brands, OutputFormat::Csv) => {
            export::export_brands_csv(&state.filtered_brands(), &mut writer, &path)?
        }
        (CatalogKind::Locations, _) => {
            export::export_json(&state.filtered_locations(), &mut writer, &path)?
        }
        (CatalogKind::Brands, _) => {
            export::export_json(&state.filtered_brands(), &mut writer, &path)?
        }
    };

    if output.is_some() {
        eprintln!("Exported {count} {kind} to {}", path.display());
    }
    tracing::info!(count, path = %path.display(), "Export complete");
    Ok(())
}

/// Persist the criteria used for this run. Best-effort: failures are
/// logged, never surfaced.
fn save_session(kind: CatalogKind, criteria: &FilterCriteria, session_file: &std::path::Path) {
    let mut data = session::load(session_file).unwrap_or_else(|| session::SessionData {
        version: session::SESSION_VERSION,
        ..Default::default()
    });

    let slot = match kind {
        CatalogKind::Locations => &mut data.locations,
        CatalogKind::Brands => &mut data.brands,
    };
    *slot = session::PersistedCriteria::from_criteria(criteria);
    data.saved_at = Some(chrono::Utc::now());

    if let Err(msg) = session::save(&data, session_file) {
        tracing::warn!(error = %msg, "Failed to save session");
    }
}
