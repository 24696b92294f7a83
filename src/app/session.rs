// FleetDex - app/session.rs
//
// Search session persistence: save and restore the last-used filter
// criteria per directory between invocations (the `--last` flag).
//
// Design principles:
// - The session is saved atomically (write→temp, rename→final) so a crash
//   during save never corrupts the previous good session.
// - Load errors are silently discarded (a corrupt or incompatible session
//   just starts fresh rather than surfacing errors to the user).
// - The data directory is created on first save; no user action required.
// - Only criteria are persisted — datasets are reloaded on every run so the
//   directory always reflects current built-in and user data.

use crate::core::filter::{FilterCriteria, Selector};
use crate::util::constants::SESSION_FILE_NAME;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Increment this constant whenever `SessionData` gains or removes fields
/// in a breaking way. Version mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

// =============================================================================
// On-disk data structures
// =============================================================================

/// Complete persistent session snapshot.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version — must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// Last criteria used on the locations directory.
    #[serde(default)]
    pub locations: PersistedCriteria,

    /// Last criteria used on the brands directory.
    #[serde(default)]
    pub brands: PersistedCriteria,

    /// When the session was last written.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Serialisable snapshot of `FilterCriteria`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedCriteria {
    /// Free-text query. Empty = no text filter.
    #[serde(default)]
    pub query: String,

    /// Selector value as entered ("all" = unconstrained).
    #[serde(default)]
    pub selector: String,

    /// Featured-section constraint.
    #[serde(default)]
    pub featured_only: bool,

    /// Trending-section constraint.
    #[serde(default)]
    pub trending_only: bool,
}

impl PersistedCriteria {
    /// Snapshot runtime criteria for persistence.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            query: criteria.query.clone(),
            selector: criteria.selector.to_string(),
            featured_only: criteria.featured_only,
            trending_only: criteria.trending_only,
        }
    }

    /// Rebuild runtime criteria from a persisted snapshot.
    pub fn to_criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria {
            selector: Selector::parse(&self.selector),
            featured_only: self.featured_only,
            trending_only: self.trending_only,
            ..Default::default()
        };
        criteria.set_query(&self.query);
        criteria
    }
}

// =============================================================================
// I/O helpers
// =============================================================================

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically (write temp → rename).
///
/// Creates all parent directories as needed.  Returns a descriptive error
/// string suitable for a tracing warn! call; the caller decides whether to
/// surface it to the user (typically it is logged and ignored).
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "cannot create session directory '{}': {e}",
                parent.display()
            )
        })?;
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("failed to serialise session: {e}"))?;

    // Atomic write: write to a sibling temp file then rename.
    // A crash between write and rename loses the new session but never
    // corrupts the previous one (rename is atomic on all supported platforms).
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| format!("failed to write session temp file '{}': {e}", tmp.display()))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        format!("failed to finalise session file '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch).  The caller should treat `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            // Distinguish "file not found" (normal first run) from other errors.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed — starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch — starting fresh"
        );
        return None;
    }

    tracing::debug!(path = %path.display(), "Session file loaded");
    Some(data)
}

/// Delete the session file, if present. The CLI face of the reset
/// operation: the next run starts with unconstrained criteria.
pub fn clear(path: &Path) -> Result<bool, String> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Session cleared");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(format!(
            "failed to remove session file '{}': {e}",
            path.display()
        )),
    }
}

// =============================================================================
// Unit tests
// =============================================================================
