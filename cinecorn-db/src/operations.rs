//! Insert operations for all catalog entity types.
//!
//! The catalog is insert-only. Every insert uses `ON CONFLICT DO NOTHING`, so
//! a row that would violate a uniqueness constraint is skipped and reported as
//! [`InsertOutcome::Duplicate`] instead of failing the call.

use cinecorn_catalog::types::Movie;
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Catalog store is not initialized")]
    NotInitialized,
}

/// Result of a single insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written.
    Inserted,
    /// The row collided with an existing one and nothing was written.
    Duplicate,
}

impl InsertOutcome {
    pub fn is_inserted(self) -> bool {
        self == InsertOutcome::Inserted
    }

    fn from_changes(changed: usize) -> Self {
        if changed == 0 {
            InsertOutcome::Duplicate
        } else {
            InsertOutcome::Inserted
        }
    }
}

// ── Movie Operations ────────────────────────────────────────────────────────

/// Insert a movie row.
///
/// Collides on filename, mid, thumbnail path, or image path.
pub fn add_movie(conn: &Connection, movie: &Movie) -> Result<InsertOutcome, OperationError> {
    let changed = conn.execute(
        "INSERT INTO movies (filename, idx, mid, thumb_path, image_path, title,
             runtime, year, rating, summary)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT DO NOTHING",
        params![
            movie.filename,
            movie.idx,
            movie.mid,
            movie.thumb_path,
            movie.image_path,
            movie.title,
            movie.runtime,
            movie.year,
            movie.rating,
            movie.summary,
        ],
    )?;
    let outcome = InsertOutcome::from_changes(changed);
    if outcome == InsertOutcome::Duplicate {
        log::debug!("Movie '{}' ({}) already cataloged", movie.filename, movie.mid);
    }
    Ok(outcome)
}

// ── Person Operations ───────────────────────────────────────────────────────

/// Insert a person. People are shared across movies, so duplicates are routine.
pub fn add_person(
    conn: &Connection,
    pid: &str,
    name: &str,
) -> Result<InsertOutcome, OperationError> {
    let changed = conn.execute(
        "INSERT INTO people (pid, name) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        params![pid, name],
    )?;
    Ok(InsertOutcome::from_changes(changed))
}

// ── Relationship Operations ─────────────────────────────────────────────────

/// Record that a person directed a movie.
pub fn add_directs(
    conn: &Connection,
    pid: &str,
    mid: &str,
) -> Result<InsertOutcome, OperationError> {
    let changed = conn.execute(
        "INSERT INTO rel_directs (pid, mid) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        params![pid, mid],
    )?;
    Ok(InsertOutcome::from_changes(changed))
}

/// Record that a person acted in a movie.
pub fn add_acts(conn: &Connection, pid: &str, mid: &str) -> Result<InsertOutcome, OperationError> {
    let changed = conn.execute(
        "INSERT INTO rel_acts (pid, mid) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        params![pid, mid],
    )?;
    Ok(InsertOutcome::from_changes(changed))
}

/// Tag a movie with a genre.
pub fn add_genre(
    conn: &Connection,
    mid: &str,
    genre: &str,
) -> Result<InsertOutcome, OperationError> {
    let changed = conn.execute(
        "INSERT INTO rel_genres (mid, genre) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        params![mid, genre],
    )?;
    Ok(InsertOutcome::from_changes(changed))
}
