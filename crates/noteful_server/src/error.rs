//! HTTP error taxonomy and its JSON rendering.
//!
//! # Invariants
//! - Validation failures render as `400 {"error":{"message":...}}`.
//! - Missing resources render as `404 {"error":{"message":...}}`.
//! - Store failures render as a bare `500 {"error":"Server error"}` and carry
//!   a `StoreFailure` extension; `middleware::render_server_errors` logs it and
//!   exposes details outside production.

use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use noteful_core::{FolderServiceError, NoteServiceError};
use serde_json::json;
use std::fmt::{Display, Formatter};

pub const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request input.
    Validation(String),
    /// Target resource is absent.
    NotFound(String),
    /// Datastore failure, never recovered.
    Store { message: String, detail: String },
}

/// Details of a store failure, attached to the 500 response.
#[derive(Debug, Clone)]
pub struct StoreFailure {
    pub message: String,
    pub detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn store<E: std::error::Error>(err: &E) -> Self {
        Self::Store {
            message: err.to_string(),
            detail: format!("{err:?}"),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) | Self::NotFound(message) => write!(f, "{message}"),
            Self::Store { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(message) | Self::NotFound(message) => {
                (status, Json(json!({ "error": { "message": message } }))).into_response()
            }
            Self::Store { message, detail } => {
                let mut response =
                    (status, Json(json!({ "error": SERVER_ERROR_MESSAGE }))).into_response();
                response
                    .extensions_mut()
                    .insert(StoreFailure { message, detail });
                response
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        Self::store(&value)
    }
}

impl From<FolderServiceError> for ApiError {
    fn from(value: FolderServiceError) -> Self {
        match value {
            FolderServiceError::MissingField(_)
            | FolderServiceError::EmptyName
            | FolderServiceError::NoUpdatableFields => Self::Validation(value.to_string()),
            FolderServiceError::FolderNotFound(_) => Self::NotFound(value.to_string()),
            FolderServiceError::Repo(ref err) => Self::store(err),
        }
    }
}

impl From<NoteServiceError> for ApiError {
    fn from(value: NoteServiceError) -> Self {
        match value {
            NoteServiceError::EmptyNameOrContent
            | NoteServiceError::MissingField(_)
            | NoteServiceError::NoUpdatableFields
            | NoteServiceError::FolderNotFound(_) => Self::Validation(value.to_string()),
            NoteServiceError::NoteNotFound(_) => Self::NotFound(value.to_string()),
            NoteServiceError::Repo(ref err) => Self::store(err),
        }
    }
}
