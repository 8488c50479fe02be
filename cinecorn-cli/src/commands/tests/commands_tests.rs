use super::*;

fn journal_mode(path: &Path) -> String {
    let conn = Connection::open(path).unwrap();
    conn.pragma_query_value(None, "journal_mode", |row| row.get(0))
        .unwrap()
}

#[test]
fn existing_catalog_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cinecorn.db");
    assert!(open_existing_catalog(&path).unwrap().is_none());
    assert!(!path.exists());
}

#[test]
fn existing_catalog_rejects_foreign_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE notes (body TEXT);")
        .unwrap();

    let err = open_existing_catalog(&path).unwrap_err();
    assert!(matches!(err, CliError::Database(_)));

    let conn = Connection::open(&path).unwrap();
    assert_eq!(cinecorn_db::table_names(&conn).unwrap(), vec!["notes"]);
    assert_eq!(journal_mode(&path), "delete");
}

#[test]
fn existing_catalog_opens_initialized_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cinecorn.db");
    drop(cinecorn_db::open_database(&path).unwrap());

    let conn = open_existing_catalog(&path).unwrap().unwrap();
    assert_eq!(cinecorn_db::catalog_stats(&conn).unwrap().movies, 0);
}

#[test]
fn dry_run_ingest_does_not_create_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cinecorn.db");

    let conn = open_catalog_for_ingest(&path, true).unwrap();
    assert_eq!(cinecorn_db::table_names(&conn).unwrap().len(), 5);
    drop(conn);
    assert!(!path.exists());
}

#[test]
fn dry_run_ingest_leaves_existing_database_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE notes (body TEXT);")
        .unwrap();

    assert!(open_catalog_for_ingest(&path, true).is_err());
    let conn = Connection::open(&path).unwrap();
    assert_eq!(cinecorn_db::table_names(&conn).unwrap(), vec!["notes"]);
    assert_eq!(journal_mode(&path), "delete");
}

#[test]
fn real_ingest_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cinecorn.db");

    drop(open_catalog_for_ingest(&path, false).unwrap());
    assert!(path.exists());
    assert_eq!(journal_mode(&path), "wal");
}

#[test]
fn truncate_str_appends_ellipsis() {
    assert_eq!(truncate_str("The Good, the Bad", 8), "The G...");
    assert_eq!(truncate_str("Heat", 8), "Heat");
    assert_eq!(truncate_str("Heat", 2), "He");
}
