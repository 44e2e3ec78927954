//! Post-migration schema verification.

use super::{DbError, DbResult};
use rusqlite::Connection;

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("noteful_folders", &["id", "name"]),
    (
        "noteful_notes",
        &["id", "name", "content", "modified", "folder_id"],
    ),
];

/// Checks that every table and column the repositories read is present.
pub(crate) fn verify_schema(conn: &Connection) -> DbResult<()> {
    for &(table, columns) in REQUIRED_COLUMNS {
        let existing = table_columns(conn, table)?;
        if existing.is_empty() {
            return Err(DbError::MissingTable(table));
        }
        for &column in columns {
            if !existing.iter().any(|name| name == column) {
                return Err(DbError::MissingColumn { table, column });
            }
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
