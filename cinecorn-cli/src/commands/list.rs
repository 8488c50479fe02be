use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::truncate_str;

/// List cataloged movies grouped by index letter.
pub(crate) fn run_list(db_path: &Path, letter: Option<String>) -> Result<(), CliError> {
    let Some(conn) = super::open_existing_catalog(db_path)? else {
        return Ok(());
    };

    let letter = letter.map(|l| l.trim().to_uppercase());
    let movies = cinecorn_db::list_movies(&conn, letter.as_deref())
        .map_err(|e| CliError::database(e.to_string()))?;

    if movies.is_empty() {
        match &letter {
            Some(l) => log::info!("No movies filed under '{}'", l),
            None => log::info!("The catalog is empty"),
        }
        return Ok(());
    }

    let mut current_idx: Option<&str> = None;
    for movie in &movies {
        if current_idx != Some(movie.idx.as_str()) {
            if current_idx.is_some() {
                crate::log_blank();
            }
            log::info!("{}", movie.idx.if_supports_color(Stdout, |t| t.bold()));
            current_idx = Some(movie.idx.as_str());
        }
        log::info!(
            "  {:<50} {:>4}  {}",
            truncate_str(&movie.title, 50),
            movie.year,
            movie.filename.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    crate::log_blank();
    log::info!("{} movies", movies.len());
    Ok(())
}
