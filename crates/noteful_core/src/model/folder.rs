//! Folder domain model.

use serde::{Deserialize, Serialize};

/// Store-assigned folder identifier.
pub type FolderId = i64;

/// One row of `noteful_folders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
}

/// Insert shape for a folder. The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFolder {
    pub name: String,
}

/// Partial update for a folder. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPatch {
    pub name: Option<String>,
}

impl FolderPatch {
    /// Returns true when the patch would not change any column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
