use std::path::Path;

use cinecorn_catalog::types::{Movie, Person};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use crate::CliError;

#[derive(Serialize)]
struct MovieDetails<'a> {
    #[serde(flatten)]
    movie: &'a Movie,
    directors: Vec<Person>,
    cast: Vec<Person>,
    genres: Vec<String>,
}

/// Show one cataloged movie with its credits and genres.
pub(crate) fn run_show(db_path: &Path, filename: &str, json: bool) -> Result<(), CliError> {
    let Some(conn) = super::open_existing_catalog(db_path)? else {
        return Ok(());
    };

    let db_err = |e: cinecorn_db::OperationError| CliError::database(e.to_string());
    let movie = cinecorn_db::find_movie_by_filename(&conn, filename)
        .map_err(db_err)?
        .ok_or_else(|| CliError::other(format!("'{}' is not in the catalog", filename)))?;

    let details = MovieDetails {
        movie: &movie,
        directors: cinecorn_db::directors_for_movie(&conn, &movie.mid).map_err(db_err)?,
        cast: cinecorn_db::cast_for_movie(&conn, &movie.mid).map_err(db_err)?,
        genres: cinecorn_db::genres_for_movie(&conn, &movie.mid).map_err(db_err)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    log::info!(
        "{} ({})",
        movie.title.if_supports_color(Stdout, |t| t.bold()),
        movie.year,
    );
    log::info!("  File:     {}", movie.filename);
    log::info!("  Id:       {}", movie.mid);
    log::info!("  Index:    {}", movie.idx);
    log::info!("  Runtime:  {} min", movie.runtime);
    log::info!("  Rating:   {:.1}", movie.rating);
    if !details.genres.is_empty() {
        log::info!("  Genres:   {}", details.genres.join(", "));
    }
    if let Some(summary) = &movie.summary {
        log::info!("  Summary:  {}", summary);
    }
    for (label, path) in [("Thumb", &movie.thumb_path), ("Image", &movie.image_path)] {
        if let Some(path) = path {
            log::info!(
                "  {:<9} {}",
                format!("{}:", label),
                path.if_supports_color(Stdout, |t| t.cyan())
            );
        }
    }

    print_people("Directed by", &details.directors);
    print_people("Cast", &details.cast);
    Ok(())
}

fn print_people(heading: &str, people: &[Person]) {
    if people.is_empty() {
        return;
    }
    crate::log_blank();
    log::info!("{}", heading.if_supports_color(Stdout, |t| t.bold()));
    for person in people {
        log::info!(
            "  {} {}",
            person.name,
            person.pid.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}
