//! Note domain model.

use crate::model::folder::FolderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned note identifier.
pub type NoteId = i64;

/// One row of `noteful_notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub name: String,
    pub content: String,
    /// Last modification time, UTC.
    pub modified: DateTime<Utc>,
    /// Owning folder.
    pub folder_id: FolderId,
}

/// Insert shape for a note.
///
/// `modified` falls back to the store's insert time when `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub name: String,
    pub content: String,
    pub modified: Option<DateTime<Utc>>,
    pub folder_id: FolderId,
}

/// Partial update for a note. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub name: Option<String>,
    pub content: Option<String>,
    pub modified: Option<DateTime<Utc>>,
    pub folder_id: Option<FolderId>,
}

impl NotePatch {
    /// Returns true when the patch would not change any column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.content.is_none()
            && self.modified.is_none()
            && self.folder_id.is_none()
    }
}
