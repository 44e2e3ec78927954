//! Note repository contract and SQLite implementation.
//!
//! # Invariants
//! - `modified` is stored as RFC 3339 UTC text with millisecond precision.
//! - `folder_id` is enforced by the schema foreign key; callers that want a
//!   clean validation error check `folder_exists` first.

use crate::model::folder::FolderId;
use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use crate::repo::{parse_timestamp, timestamp_to_db, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    name,
    content,
    modified,
    folder_id
FROM noteful_notes";

/// Data access for `noteful_notes`.
pub trait NoteRepository {
    /// Lists every note ordered by `id`.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Gets one note, `None` when absent.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Inserts one note and returns the stored row.
    fn insert_note(&self, note: &NewNote) -> RepoResult<Note>;
    /// Applies a partial update and returns the affected row count.
    fn update_note(&self, id: NoteId, patch: &NotePatch) -> RepoResult<usize>;
    /// Deletes one note and returns the affected row count.
    fn delete_note(&self, id: NoteId) -> RepoResult<usize>;
    /// Returns whether a folder with this id exists.
    fn folder_exists(&self, folder_id: FolderId) -> RepoResult<bool>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn insert_note(&self, note: &NewNote) -> RepoResult<Note> {
        let modified = note.modified.as_ref().map(timestamp_to_db);
        let mut stmt = self.conn.prepare(
            "INSERT INTO noteful_notes (name, content, modified, folder_id)
             VALUES (
                ?1,
                ?2,
                COALESCE(?3, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                ?4
             )
             RETURNING id, name, content, modified, folder_id;",
        )?;
        let mut rows = stmt.query(params![
            note.name.as_str(),
            note.content.as_str(),
            modified,
            note.folder_id,
        ])?;
        let inserted = match rows.next()? {
            Some(row) => parse_note_row(row)?,
            None => return Err(rusqlite::Error::QueryReturnedNoRows.into()),
        };
        Ok(inserted)
    }

    fn update_note(&self, id: NoteId, patch: &NotePatch) -> RepoResult<usize> {
        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = patch.name.as_ref() {
            assignments.push("name = ?");
            bind_values.push(Value::Text(name.clone()));
        }
        if let Some(content) = patch.content.as_ref() {
            assignments.push("content = ?");
            bind_values.push(Value::Text(content.clone()));
        }
        if let Some(modified) = patch.modified.as_ref() {
            assignments.push("modified = ?");
            bind_values.push(Value::Text(timestamp_to_db(modified)));
        }
        if let Some(folder_id) = patch.folder_id {
            assignments.push("folder_id = ?");
            bind_values.push(Value::Integer(folder_id));
        }

        if assignments.is_empty() {
            return Ok(0);
        }

        bind_values.push(Value::Integer(id));
        let sql = format!(
            "UPDATE noteful_notes SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(changed)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM noteful_notes WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn folder_exists(&self, folder_id: FolderId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM noteful_folders WHERE id = ?1);",
            [folder_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let modified_text: String = row.get("modified")?;
    Ok(Note {
        id: row.get("id")?,
        name: row.get("name")?,
        content: row.get("content")?,
        modified: parse_timestamp(&modified_text)?,
        folder_id: row.get("folder_id")?,
    })
}
