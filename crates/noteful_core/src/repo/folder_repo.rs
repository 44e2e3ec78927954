//! Folder repository contract and SQLite implementation.

use crate::model::folder::{Folder, FolderId, FolderPatch, NewFolder};
use crate::repo::RepoResult;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};

const FOLDER_SELECT_SQL: &str = "SELECT id, name FROM noteful_folders";

/// Data access for `noteful_folders`.
pub trait FolderRepository {
    /// Lists every folder ordered by `id`.
    fn list_folders(&self) -> RepoResult<Vec<Folder>>;
    /// Gets one folder, `None` when absent.
    fn get_folder(&self, id: FolderId) -> RepoResult<Option<Folder>>;
    /// Inserts one folder and returns the stored row.
    fn insert_folder(&self, folder: &NewFolder) -> RepoResult<Folder>;
    /// Applies a partial update and returns the affected row count.
    fn update_folder(&self, id: FolderId, patch: &FolderPatch) -> RepoResult<usize>;
    /// Deletes one folder (and its notes) and returns the affected row count.
    fn delete_folder(&self, id: FolderId) -> RepoResult<usize>;
}

/// SQLite-backed folder repository.
pub struct SqliteFolderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFolderRepository<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FolderRepository for SqliteFolderRepository<'_> {
    fn list_folders(&self) -> RepoResult<Vec<Folder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FOLDER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut folders = Vec::new();
        while let Some(row) = rows.next()? {
            folders.push(parse_folder_row(row)?);
        }
        Ok(folders)
    }

    fn get_folder(&self, id: FolderId) -> RepoResult<Option<Folder>> {
        let folder = self
            .conn
            .query_row(
                &format!("{FOLDER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_folder_row,
            )
            .optional()?;
        Ok(folder)
    }

    fn insert_folder(&self, folder: &NewFolder) -> RepoResult<Folder> {
        let inserted = self.conn.query_row(
            "INSERT INTO noteful_folders (name) VALUES (?1) RETURNING id, name;",
            [folder.name.as_str()],
            parse_folder_row,
        )?;
        Ok(inserted)
    }

    fn update_folder(&self, id: FolderId, patch: &FolderPatch) -> RepoResult<usize> {
        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = patch.name.as_ref() {
            assignments.push("name = ?");
            bind_values.push(Value::Text(name.clone()));
        }

        if assignments.is_empty() {
            return Ok(0);
        }

        bind_values.push(Value::Integer(id));
        let sql = format!(
            "UPDATE noteful_folders SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(changed)
    }

    fn delete_folder(&self, id: FolderId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM noteful_folders WHERE id = ?1;", [id])?;
        Ok(changed)
    }
}

fn parse_folder_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
