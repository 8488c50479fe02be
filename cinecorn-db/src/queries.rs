//! Read queries for the catalog database.
//!
//! Provides lookup by filename and mid, alphabetic listing, credits, and stats.

use cinecorn_catalog::types::{Movie, Person};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::operations::OperationError;

const MOVIE_COLUMNS: &str = "filename, idx, mid, thumb_path, image_path, title,
     runtime, year, rating, summary";

// ── Movie Lookups ───────────────────────────────────────────────────────────

/// Find a movie by the filename it was cataloged from.
pub fn find_movie_by_filename(
    conn: &Connection,
    filename: &str,
) -> Result<Option<Movie>, OperationError> {
    let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE filename = ?1");
    conn.query_row(&sql, params![filename], row_to_movie)
        .optional()
        .map_err(Into::into)
}

/// Find a movie by provider id.
pub fn find_movie_by_mid(conn: &Connection, mid: &str) -> Result<Option<Movie>, OperationError> {
    let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE mid = ?1");
    conn.query_row(&sql, params![mid], row_to_movie)
        .optional()
        .map_err(Into::into)
}

/// Whether a file has already been cataloged.
pub fn movie_exists(conn: &Connection, filename: &str) -> Result<bool, OperationError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM movies WHERE filename = ?1)",
        params![filename],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// List movies ordered by index letter then title, optionally for one letter.
pub fn list_movies(conn: &Connection, idx: Option<&str>) -> Result<Vec<Movie>, OperationError> {
    let sql = format!(
        "SELECT {MOVIE_COLUMNS} FROM movies
         WHERE ?1 IS NULL OR idx = ?1
         ORDER BY idx, title"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![idx], row_to_movie)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Credits ─────────────────────────────────────────────────────────────────

/// Actors credited on a movie, by name.
pub fn cast_for_movie(conn: &Connection, mid: &str) -> Result<Vec<Person>, OperationError> {
    people_for_movie(conn, "rel_acts", mid)
}

/// Directors credited on a movie, by name.
pub fn directors_for_movie(conn: &Connection, mid: &str) -> Result<Vec<Person>, OperationError> {
    people_for_movie(conn, "rel_directs", mid)
}

fn people_for_movie(
    conn: &Connection,
    relation: &str,
    mid: &str,
) -> Result<Vec<Person>, OperationError> {
    let sql = format!(
        "SELECT p.pid, p.name FROM people p
         JOIN {relation} r ON r.pid = p.pid
         WHERE r.mid = ?1
         ORDER BY p.name, p.pid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![mid], |row| {
        Ok(Person {
            pid: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Genres tagged on a movie, alphabetically.
pub fn genres_for_movie(conn: &Connection, mid: &str) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare("SELECT genre FROM rel_genres WHERE mid = ?1 ORDER BY genre")?;
    let rows = stmt.query_map(params![mid], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Index & Stats ───────────────────────────────────────────────────────────

/// An index letter with the number of movies filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLetter {
    pub idx: String,
    pub movies: i64,
}

/// Distinct index letters in use, alphabetically.
pub fn index_letters(conn: &Connection) -> Result<Vec<IndexLetter>, OperationError> {
    let mut stmt = conn.prepare("SELECT idx, COUNT(*) FROM movies GROUP BY idx ORDER BY idx")?;
    let rows = stmt.query_map([], |row| {
        Ok(IndexLetter {
            idx: row.get(0)?,
            movies: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Get summary statistics for the catalog.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let movies: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |r| r.get(0))?;
    let people: i64 = conn.query_row("SELECT COUNT(*) FROM people", [], |r| r.get(0))?;
    let directs: i64 = conn.query_row("SELECT COUNT(*) FROM rel_directs", [], |r| r.get(0))?;
    let acts: i64 = conn.query_row("SELECT COUNT(*) FROM rel_acts", [], |r| r.get(0))?;
    let genres: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT genre) FROM rel_genres",
        [],
        |r| r.get(0),
    )?;

    Ok(CatalogStats {
        movies,
        people,
        directs,
        acts,
        genres,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub movies: i64,
    pub people: i64,
    pub directs: i64,
    pub acts: i64,
    /// Distinct genre names.
    pub genres: i64,
}

fn row_to_movie(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        filename: row.get(0)?,
        idx: row.get(1)?,
        mid: row.get(2)?,
        thumb_path: row.get(3)?,
        image_path: row.get(4)?,
        title: row.get(5)?,
        runtime: row.get(6)?,
        year: row.get(7)?,
        rating: row.get(8)?,
        summary: row.get(9)?,
    })
}
