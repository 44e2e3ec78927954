//! Core domain logic for the Noteful API.
//! This crate owns the folder/note invariants, validation rules and storage.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::field::BodyField;
pub use model::folder::{Folder, FolderId, FolderPatch, NewFolder};
pub use model::note::{NewNote, Note, NoteId, NotePatch};
pub use repo::folder_repo::{FolderRepository, SqliteFolderRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::folder_service::{
    CreateFolderRequest, FolderService, FolderServiceError, FolderView, UpdateFolderRequest,
};
pub use service::note_service::{
    CreateNoteRequest, NoteService, NoteServiceError, NoteView, UpdateNoteRequest,
};
pub use service::sanitize::sanitize;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
