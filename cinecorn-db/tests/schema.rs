use cinecorn_db::schema::{CURRENT_VERSION, TABLES};
use cinecorn_db::*;
use rusqlite::Connection;

#[test]
fn initialize_creates_all_tables() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(conn.execute_batch("SELECT count(*) FROM movies").is_err());

    assert_eq!(initialize(&conn).unwrap(), InitOutcome::Created);

    let count: i64 = conn
        .query_row("SELECT count(*) FROM movies", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);

    let mut expected: Vec<String> = TABLES.iter().map(|t| t.to_string()).collect();
    expected.sort();
    assert_eq!(table_names(&conn).unwrap(), expected);
}

#[test]
fn initialize_twice_is_a_noop() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(initialize(&conn).unwrap(), InitOutcome::Created);
    assert_eq!(initialize(&conn).unwrap(), InitOutcome::AlreadyInitialized);
    assert_eq!(table_names(&conn).unwrap().len(), 5);
}

#[test]
fn open_memory_is_initialized() {
    let conn = open_memory().unwrap();
    assert_eq!(initialize(&conn).unwrap(), InitOutcome::AlreadyInitialized);
}

#[test]
fn schema_version_is_recorded() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn newer_schema_version_is_rejected() {
    let conn = open_memory().unwrap();
    conn.pragma_update(None, "user_version", CURRENT_VERSION + 1)
        .unwrap();
    let err = initialize(&conn).unwrap_err();
    assert!(matches!(err, SchemaError::VersionMismatch { .. }));
}

#[test]
fn partial_schema_is_reported() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE movies (filename TEXT PRIMARY KEY);")
        .unwrap();
    match initialize(&conn).unwrap_err() {
        SchemaError::Incomplete { missing } => {
            assert_eq!(missing, vec!["people", "rel_directs", "rel_acts", "rel_genres"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_database_on_disk_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cinecorn.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO people (pid, name) VALUES ('0000001', 'Clint Eastwood')",
            [],
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    let name: String = conn
        .query_row("SELECT name FROM people WHERE pid = '0000001'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "Clint Eastwood");
    assert_eq!(table_names(&conn).unwrap().len(), 5);
}

#[test]
fn open_read_only_leaves_foreign_database_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE notes (body TEXT);").unwrap();
    }

    match open_read_only(&path).unwrap_err() {
        SchemaError::Incomplete { missing } => assert_eq!(missing.len(), TABLES.len()),
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(table_names(&conn).unwrap(), vec!["notes"]);
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .unwrap();
    assert_eq!(mode, "delete");
}

#[test]
fn open_read_only_reads_catalog_and_refuses_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cinecorn.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO people (pid, name) VALUES ('0000001', 'Clint Eastwood')",
            [],
        )
        .unwrap();
    }

    let conn = open_read_only(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT count(*) FROM people", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert!(
        conn.execute(
            "INSERT INTO people (pid, name) VALUES ('0000002', 'Eli Wallach')",
            [],
        )
        .is_err()
    );
}

#[test]
fn open_read_only_missing_file_fails_without_creating_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");
    assert!(matches!(
        open_read_only(&path).unwrap_err(),
        SchemaError::Sqlite(_)
    ));
    assert!(!path.exists());
}
