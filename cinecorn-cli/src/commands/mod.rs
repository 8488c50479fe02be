pub(crate) mod config;
pub(crate) mod ingest;
pub(crate) mod init;
pub(crate) mod list;
pub(crate) mod lookup;
pub(crate) mod show;
pub(crate) mod stats;

use std::path::Path;

use cinecorn_scraper::ProviderConfig;
use rusqlite::Connection;

use crate::CliError;
use crate::cli_types::ProviderArgs;

/// Open an existing catalog for reading.
///
/// Returns `None` (after telling the user) when there is no database yet.
pub(crate) fn open_existing_catalog(db_path: &Path) -> Result<Option<Connection>, CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'cinecorn init' or 'cinecorn ingest <dir>' to create one.");
        return Ok(None);
    }

    cinecorn_db::open_read_only(db_path)
        .map(Some)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}

/// Open the catalog that an ingest run writes into.
///
/// A dry run never touches the file: an existing catalog is opened read-only
/// and a missing one is replaced by an empty in-memory catalog.
pub(crate) fn open_catalog_for_ingest(
    db_path: &Path,
    dry_run: bool,
) -> Result<Connection, CliError> {
    let opened = if !dry_run {
        cinecorn_db::open_database(db_path)
    } else if db_path.exists() {
        cinecorn_db::open_read_only(db_path)
    } else {
        log::debug!("No catalog at {}, dry run uses an empty one", db_path.display());
        cinecorn_db::open_memory()
    };
    opened.map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}

/// Resolve the provider config, with command-line flags taking priority.
pub(crate) fn load_provider_config(args: ProviderArgs) -> Result<ProviderConfig, CliError> {
    ProviderConfig::load_with_overrides(args.provider_url, args.api_key)
        .map_err(|e| CliError::config(e.to_string()))
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
