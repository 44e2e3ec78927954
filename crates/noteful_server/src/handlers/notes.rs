//! `/notes` resource.

use crate::error::ApiError;
use crate::handlers::{parse_body, parse_id, resource_location};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{OriginalUri, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use noteful_core::{
    CreateNoteRequest, NoteService, NoteView, SqliteNoteRepository, UpdateNoteRequest,
};

const NOTE_NOT_FOUND: &str = "note does not exist";

pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteView>>, ApiError> {
    let notes = state
        .store
        .call(|conn| NoteService::new(SqliteNoteRepository::new(conn)).list_notes())
        .await??;
    Ok(Json(notes))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<NoteView>, ApiError> {
    let id = parse_id(&note_id, NOTE_NOT_FOUND)?;
    let note = state
        .store
        .call(move |conn| NoteService::new(SqliteNoteRepository::new(conn)).get_note(id))
        .await??;
    Ok(Json(note))
}

pub async fn create_note(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: CreateNoteRequest = parse_body(&body)?;
    let note = state
        .store
        .call(move |conn| NoteService::new(SqliteNoteRepository::new(conn)).create_note(request))
        .await??;
    let location = resource_location(&uri, note.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(note)))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&note_id, NOTE_NOT_FOUND)?;
    let request: UpdateNoteRequest = parse_body(&body)?;
    state
        .store
        .call(move |conn| {
            NoteService::new(SqliteNoteRepository::new(conn)).update_note(id, request)
        })
        .await??;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&note_id, NOTE_NOT_FOUND)?;
    state
        .store
        .call(move |conn| NoteService::new(SqliteNoteRepository::new(conn)).delete_note(id))
        .await??;
    Ok(StatusCode::NO_CONTENT)
}
