//! `/folders` resource.

use crate::error::ApiError;
use crate::handlers::{parse_body, parse_id, resource_location};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{OriginalUri, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use noteful_core::{
    CreateFolderRequest, FolderService, FolderView, SqliteFolderRepository, UpdateFolderRequest,
};

const FOLDER_NOT_FOUND: &str = "folder doesn't exist";

pub async fn list_folders(State(state): State<AppState>) -> Result<Json<Vec<FolderView>>, ApiError> {
    let folders = state
        .store
        .call(|conn| FolderService::new(SqliteFolderRepository::new(conn)).list_folders())
        .await??;
    Ok(Json(folders))
}

pub async fn get_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Result<Json<FolderView>, ApiError> {
    let id = parse_id(&folder_id, FOLDER_NOT_FOUND)?;
    let folder = state
        .store
        .call(move |conn| FolderService::new(SqliteFolderRepository::new(conn)).get_folder(id))
        .await??;
    Ok(Json(folder))
}

pub async fn create_folder(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: CreateFolderRequest = parse_body(&body)?;
    let folder = state
        .store
        .call(move |conn| {
            FolderService::new(SqliteFolderRepository::new(conn)).create_folder(request)
        })
        .await??;
    let location = resource_location(&uri, folder.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(folder)))
}

pub async fn update_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&folder_id, FOLDER_NOT_FOUND)?;
    let request: UpdateFolderRequest = parse_body(&body)?;
    state
        .store
        .call(move |conn| {
            FolderService::new(SqliteFolderRepository::new(conn)).update_folder(id, request)
        })
        .await??;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&folder_id, FOLDER_NOT_FOUND)?;
    state
        .store
        .call(move |conn| FolderService::new(SqliteFolderRepository::new(conn)).delete_folder(id))
        .await??;
    Ok(StatusCode::NO_CONTENT)
}
