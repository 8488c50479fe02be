use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = super::open_existing_catalog(db_path)? else {
        return Ok(());
    };

    let stats = cinecorn_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;
    let letters = cinecorn_db::index_letters(&conn)
        .map_err(|e| CliError::database(format!("Failed to query index letters: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Movies:         {:>8}", stats.movies);
    log::info!("  People:         {:>8}", stats.people);
    log::info!("  Director links: {:>8}", stats.directs);
    log::info!("  Actor links:    {:>8}", stats.acts);
    log::info!("  Genres:         {:>8}", stats.genres);

    if !letters.is_empty() {
        crate::log_blank();
        let summary: Vec<String> = letters
            .iter()
            .map(|l| format!("{} {}", l.idx, l.movies))
            .collect();
        log::info!("  By letter: {}", summary.join("  "));
    }

    Ok(())
}
