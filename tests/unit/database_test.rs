//! Unit tests for the database layer (connection + migrations).

use linkshelf::database::migrations::{get_schema_version, run_all, CURRENT_SCHEMA_VERSION};
use linkshelf::database::Database;
use tempfile::TempDir;

#[test]
fn test_migrations_create_bookmarks_table_and_index() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    for (kind, name) in [("table", "bookmarks"), ("index", "idx_bookmarks_user_created")] {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = ?1 AND name = ?2",
                [kind, name],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "{} '{}' should exist after migrations", kind, name);
    }
}

#[test]
fn test_schema_version_recorded_once() {
    let db = Database::open_in_memory().unwrap();
    let conn = db.connection();
    assert_eq!(get_schema_version(conn), CURRENT_SCHEMA_VERSION);

    run_all(conn).expect("re-running migrations should be a no-op");
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, CURRENT_SCHEMA_VERSION as i64);
}

#[test]
fn test_empty_title_rejected_by_schema() {
    let db = Database::open_in_memory().unwrap();
    let result = db.connection().execute(
        "INSERT INTO bookmarks (id, title, url, user_id, created_at) VALUES ('a', '', 'https://x.io', 'u', 0)",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn test_open_file_creates_parent_dirs_and_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("linkshelf.db");

    {
        let db = Database::open(&path).unwrap();
        db.connection()
            .execute(
                "INSERT INTO bookmarks (id, title, url, user_id, created_at) VALUES ('a', 'A', 'https://a.io', 'u', 1)",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
