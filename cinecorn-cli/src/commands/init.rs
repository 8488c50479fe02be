use std::path::Path;

use cinecorn_db::{CatalogStore, InitOutcome};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use crate::CliError;

/// Create the catalog schema, or confirm that it is already in place.
pub(crate) fn run_init(db_path: &Path) -> Result<(), CliError> {
    let conn = Connection::open(db_path).map_err(|e| {
        CliError::database(format!("Failed to open {}: {}", db_path.display(), e))
    })?;

    let mut store = CatalogStore::new(&conn);
    let outcome = store
        .initialize()
        .map_err(|e| CliError::database(e.to_string()))?;

    match outcome {
        InitOutcome::Created => log::info!(
            "{} {}",
            "Created catalog".if_supports_color(Stdout, |t| t.green()),
            db_path.display(),
        ),
        InitOutcome::AlreadyInitialized => log::info!(
            "Catalog {} is already initialized",
            db_path.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
    }

    let tables = cinecorn_db::table_names(&conn).map_err(|e| CliError::database(e.to_string()))?;
    log::debug!("Tables: {}", tables.join(", "));
    Ok(())
}
