use noteful_core::db::migrations::latest_version;
use noteful_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn fresh_store_has_both_tables_at_latest_version() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), latest_version());
    assert_eq!(
        table_names(&conn),
        vec!["noteful_folders".to_string(), "noteful_notes".to_string()]
    );
}

#[test]
fn note_with_unknown_folder_is_rejected_by_the_schema() {
    let conn = open_db_in_memory().unwrap();

    let err = conn
        .execute(
            "INSERT INTO noteful_notes (name, content, folder_id) VALUES ('n', 'c', 42);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn deleting_a_folder_cascades_to_its_notes() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO noteful_folders (name) VALUES ('Inbox');
         INSERT INTO noteful_notes (name, content, folder_id) VALUES ('a', 'b', 1);
         DELETE FROM noteful_folders WHERE id = 1;",
    )
    .unwrap();

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM noteful_notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn reopening_a_file_keeps_rows_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noteful.sqlite3");

    open_db(&path)
        .unwrap()
        .execute("INSERT INTO noteful_folders (name) VALUES ('kept');", [])
        .unwrap();

    let reopened = open_db(&path).unwrap();
    assert_eq!(user_version(&reopened), latest_version());
    let name: String = reopened
        .query_row("SELECT name FROM noteful_folders WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "kept");
}

#[test]
fn file_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn current_version_without_tables_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hollow.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::MissingTable("noteful_folders")));
}

fn user_version(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name LIKE 'noteful_%'
             ORDER BY name;",
        )
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    names
}
