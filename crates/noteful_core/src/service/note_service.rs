//! Note use-case service.
//!
//! # Responsibility
//! - Validate note create/patch bodies.
//! - Enforce that `folder_id` points at an existing folder.
//! - Produce sanitized note views.
//!
//! # Invariants
//! - Create checks run in a fixed order: empty `name`/`content`, then null
//!   fields in `name, modified, folder_id, content` order, then missing
//!   required fields, then folder existence.
//! - Patch ignores falsy values (empty strings, `0`, `null`).

use crate::model::field::BodyField;
use crate::model::folder::FolderId;
use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use crate::repo::note_repo::NoteRepository;
use crate::repo::{timestamp_to_db, RepoError};
use crate::service::sanitize::sanitize;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// `name` or `content` is an empty string.
    EmptyNameOrContent,
    /// Required body field is absent or null.
    MissingField(&'static str),
    /// Patch body carries no recognized, truthy field.
    NoUpdatableFields,
    /// `folder_id` references a folder that does not exist.
    FolderNotFound(FolderId),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNameOrContent => write!(f, "note name or content can not be empty"),
            Self::MissingField(field) => write!(f, "Missing '{field}' in request body"),
            Self::NoUpdatableFields => write!(
                f,
                "Request body must contain 'name', 'content', 'modified' or 'folder_id'"
            ),
            Self::FolderNotFound(_) => write!(f, "folder doesn't exist"),
            Self::NoteNotFound(_) => write!(f, "note does not exist"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Body of `POST /notes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub name: BodyField<String>,
    #[serde(default)]
    pub content: BodyField<String>,
    #[serde(default)]
    pub modified: BodyField<DateTime<Utc>>,
    #[serde(default)]
    pub folder_id: BodyField<FolderId>,
}

/// Body of `PATCH /notes/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub name: BodyField<String>,
    #[serde(default)]
    pub content: BodyField<String>,
    #[serde(default)]
    pub modified: BodyField<DateTime<Utc>>,
    #[serde(default)]
    pub folder_id: BodyField<FolderId>,
}

/// Output shape of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteView {
    pub id: NoteId,
    pub name: String,
    pub content: String,
    /// Written with millisecond precision so a posted value echoes back as-is.
    #[serde(serialize_with = "serialize_modified")]
    pub modified: DateTime<Utc>,
    pub folder_id: FolderId,
}

fn serialize_modified<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp_to_db(value))
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            name: sanitize(&note.name),
            content: sanitize(&note.content),
            modified: note.modified,
            folder_id: note.folder_id,
        }
    }
}

/// Note service facade over a repository implementation.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all notes as sanitized views.
    pub fn list_notes(&self) -> Result<Vec<NoteView>, NoteServiceError> {
        let notes = self.repo.list_notes()?;
        Ok(notes.iter().map(NoteView::from).collect())
    }

    /// Gets one note view.
    pub fn get_note(&self, id: NoteId) -> Result<NoteView, NoteServiceError> {
        self.repo
            .get_note(id)?
            .map(|note| NoteView::from(&note))
            .ok_or(NoteServiceError::NoteNotFound(id))
    }

    /// Validates and inserts one note.
    pub fn create_note(&self, request: CreateNoteRequest) -> Result<NoteView, NoteServiceError> {
        let new_note = validate_new_note(request)?;
        self.ensure_folder_exists(new_note.folder_id)?;
        let note = self.repo.insert_note(&new_note)?;
        info!(
            "event=note_create module=service status=ok note_id={} folder_id={}",
            note.id, note.folder_id
        );
        Ok(NoteView::from(&note))
    }

    /// Applies a partial update to one note.
    pub fn update_note(
        &self,
        id: NoteId,
        request: UpdateNoteRequest,
    ) -> Result<(), NoteServiceError> {
        let patch = validate_note_patch(request)?;
        if self.repo.get_note(id)?.is_none() {
            return Err(NoteServiceError::NoteNotFound(id));
        }
        if let Some(folder_id) = patch.folder_id {
            self.ensure_folder_exists(folder_id)?;
        }
        if self.repo.update_note(id, &patch)? == 0 {
            return Err(NoteServiceError::NoteNotFound(id));
        }
        Ok(())
    }

    /// Deletes one note.
    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        if self.repo.delete_note(id)? == 0 {
            return Err(NoteServiceError::NoteNotFound(id));
        }
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }

    fn ensure_folder_exists(&self, folder_id: FolderId) -> Result<(), NoteServiceError> {
        if self.repo.folder_exists(folder_id)? {
            Ok(())
        } else {
            Err(NoteServiceError::FolderNotFound(folder_id))
        }
    }
}

/// Checks a create body and converts it to an insert shape.
pub fn validate_new_note(request: CreateNoteRequest) -> Result<NewNote, NoteServiceError> {
    let empty_name = request.name.as_present().is_some_and(|name| name.is_empty());
    let empty_content = request
        .content
        .as_present()
        .is_some_and(|content| content.is_empty());
    if empty_name || empty_content {
        return Err(NoteServiceError::EmptyNameOrContent);
    }

    let null_checks = [
        ("name", request.name.is_null()),
        ("modified", request.modified.is_null()),
        ("folder_id", request.folder_id.is_null()),
        ("content", request.content.is_null()),
    ];
    if let Some((field, _)) = null_checks.iter().find(|(_, is_null)| *is_null) {
        return Err(NoteServiceError::MissingField(*field));
    }

    let name = request
        .name
        .into_present()
        .ok_or(NoteServiceError::MissingField("name"))?;
    let folder_id = request
        .folder_id
        .into_present()
        .ok_or(NoteServiceError::MissingField("folder_id"))?;
    let content = request
        .content
        .into_present()
        .ok_or(NoteServiceError::MissingField("content"))?;

    Ok(NewNote {
        name,
        content,
        modified: request.modified.into_present(),
        folder_id,
    })
}

/// Checks a patch body; falsy values count as not supplied.
pub fn validate_note_patch(request: UpdateNoteRequest) -> Result<NotePatch, NoteServiceError> {
    let patch = NotePatch {
        name: request.name.into_present().filter(|name| !name.is_empty()),
        content: request
            .content
            .into_present()
            .filter(|content| !content.is_empty()),
        modified: request.modified.into_present(),
        folder_id: request.folder_id.into_present().filter(|id| *id != 0),
    };
    if patch.is_empty() {
        return Err(NoteServiceError::NoUpdatableFields);
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::{
        validate_new_note, validate_note_patch, CreateNoteRequest, NoteServiceError, NoteView,
        UpdateNoteRequest,
    };
    use crate::model::field::BodyField;
    use crate::model::note::Note;

    fn full_request() -> CreateNoteRequest {
        CreateNoteRequest {
            name: BodyField::Present("Groceries".to_string()),
            content: BodyField::Present("milk, eggs".to_string()),
            modified: BodyField::Absent,
            folder_id: BodyField::Present(1),
        }
    }

    #[test]
    fn empty_string_check_runs_before_null_check() {
        let request = CreateNoteRequest {
            content: BodyField::Present(String::new()),
            folder_id: BodyField::Null,
            ..full_request()
        };
        let err = validate_new_note(request).unwrap_err();
        assert_eq!(err.to_string(), "note name or content can not be empty");
    }

    #[test]
    fn null_fields_are_reported_in_declaration_order() {
        let request = CreateNoteRequest {
            modified: BodyField::Null,
            content: BodyField::Null,
            ..full_request()
        };
        let err = validate_new_note(request).unwrap_err();
        assert!(matches!(err, NoteServiceError::MissingField("modified")));
    }

    #[test]
    fn absent_required_fields_are_missing() {
        let request = CreateNoteRequest {
            folder_id: BodyField::Absent,
            ..full_request()
        };
        let err = validate_new_note(request).unwrap_err();
        assert_eq!(err.to_string(), "Missing 'folder_id' in request body");
    }

    #[test]
    fn absent_modified_is_left_to_the_store() {
        let new_note = validate_new_note(full_request()).unwrap();
        assert!(new_note.modified.is_none());
        assert_eq!(new_note.folder_id, 1);
    }

    #[test]
    fn patch_ignores_falsy_values() {
        let err = validate_note_patch(UpdateNoteRequest {
            name: BodyField::Present(String::new()),
            content: BodyField::Null,
            modified: BodyField::Absent,
            folder_id: BodyField::Present(0),
        })
        .unwrap_err();
        assert!(matches!(err, NoteServiceError::NoUpdatableFields));

        let patch = validate_note_patch(UpdateNoteRequest {
            name: BodyField::Present(String::new()),
            content: BodyField::Present("new body".to_string()),
            ..UpdateNoteRequest::default()
        })
        .unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.content.as_deref(), Some("new body"));
    }

    #[test]
    fn view_keeps_millisecond_timestamps() {
        let note = Note {
            id: 7,
            name: "Dogs".to_string(),
            content: "woof".to_string(),
            modified: "2019-01-03T00:00:00.000Z".parse().unwrap(),
            folder_id: 1,
        };
        let json = serde_json::to_value(NoteView::from(&note)).unwrap();
        assert_eq!(json["modified"], "2019-01-03T00:00:00.000Z");
    }
}
