//! SQLite schema creation.

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema version mismatch: expected at most {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
    #[error("Catalog schema is incomplete, missing tables: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },
}

/// Current schema version, stored in `PRAGMA user_version`.
pub const CURRENT_VERSION: i32 = 1;

/// Every table owned by the catalog.
pub const TABLES: [&str; 5] = ["movies", "people", "rel_directs", "rel_acts", "rel_genres"];

/// What [`initialize`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyInitialized,
}

/// Create the catalog tables unless they already exist.
///
/// Creation happens in a single transaction, so a failure leaves no tables
/// behind. An existing schema is left untouched and reported as
/// [`InitOutcome::AlreadyInitialized`]; calling this repeatedly is safe.
pub fn initialize(conn: &Connection) -> Result<InitOutcome, SchemaError> {
    let present = existing_catalog_tables(conn)?;

    if present.len() == TABLES.len() {
        let version = schema_version(conn)?;
        if version > CURRENT_VERSION {
            return Err(SchemaError::VersionMismatch {
                expected: CURRENT_VERSION,
                found: version,
            });
        }
        log::debug!("Catalog schema already present (version {version})");
        return Ok(InitOutcome::AlreadyInitialized);
    }

    if !present.is_empty() {
        let missing = TABLES
            .iter()
            .filter(|t| !present.iter().any(|p| p == *t))
            .map(|t| t.to_string())
            .collect();
        return Err(SchemaError::Incomplete { missing });
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.pragma_update(None, "user_version", CURRENT_VERSION)?;
    tx.commit()?;

    log::debug!("Created catalog schema (version {CURRENT_VERSION})");
    Ok(InitOutcome::Created)
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    initialize(&conn)?;
    Ok(conn)
}

/// Open an existing catalog without writing to it.
///
/// The file must already hold every catalog table. Nothing is created and the
/// journal mode is left as found, so any other SQLite file is rejected intact.
pub fn open_read_only(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let present = existing_catalog_tables(&conn)?;
    if present.len() != TABLES.len() {
        let missing = TABLES
            .iter()
            .filter(|t| !present.iter().any(|p| p == *t))
            .map(|t| t.to_string())
            .collect();
        return Err(SchemaError::Incomplete { missing });
    }

    let version = schema_version(&conn)?;
    if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    initialize(&conn)?;
    Ok(conn)
}

/// Names of all user tables in the database, sorted.
pub fn table_names(conn: &Connection) -> Result<Vec<String>, SchemaError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn existing_catalog_tables(conn: &Connection) -> Result<Vec<String>, SchemaError> {
    Ok(table_names(conn)?
        .into_iter()
        .filter(|name| TABLES.contains(&name.as_str()))
        .collect())
}

fn schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

const SCHEMA_SQL: &str = r#"
-- Cataloged media files, one row per file
CREATE TABLE movies (
    filename       VARCHAR(255)  PRIMARY KEY,
    idx            VARCHAR(255)  NOT NULL,
    mid            CHAR(9)       UNIQUE NOT NULL,
    thumb_path     VARCHAR(255)  UNIQUE,
    image_path     VARCHAR(255)  UNIQUE,
    title          VARCHAR(255)  NOT NULL,
    runtime        INTEGER,
    year           INTEGER,
    rating         REAL,
    summary        TEXT
);
CREATE INDEX idx_movies_idx ON movies(idx);

CREATE TABLE people (
    pid            CHAR(9)       PRIMARY KEY,
    name           VARCHAR(255)  NOT NULL
);

CREATE TABLE rel_directs (
    pid            CHAR(9)       NOT NULL,
    mid            CHAR(9)       NOT NULL,
    PRIMARY KEY (pid, mid)
);

CREATE TABLE rel_acts (
    pid            CHAR(9)       NOT NULL,
    mid            CHAR(9)       NOT NULL,
    PRIMARY KEY (pid, mid)
);

CREATE TABLE rel_genres (
    mid            CHAR(9)       NOT NULL,
    genre          VARCHAR(255)  NOT NULL,
    PRIMARY KEY (mid, genre)
);
"#;
