//! Folder use-case service.
//!
//! # Invariants
//! - Create requires a non-null, non-empty `name`.
//! - Patch only recognizes `name`; a patch with no truthy `name` is rejected
//!   before the store is touched.

use crate::model::field::BodyField;
use crate::model::folder::{Folder, FolderId, FolderPatch, NewFolder};
use crate::repo::folder_repo::FolderRepository;
use crate::repo::RepoError;
use crate::service::sanitize::sanitize;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from folder use-cases.
#[derive(Debug)]
pub enum FolderServiceError {
    /// Required body field is absent or null.
    MissingField(&'static str),
    /// `name` is an empty string.
    EmptyName,
    /// Patch body carries no recognized, truthy field.
    NoUpdatableFields,
    /// Target folder does not exist.
    FolderNotFound(FolderId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for FolderServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing '{field}' in request body"),
            Self::EmptyName => write!(f, "folder name can not be empty"),
            Self::NoUpdatableFields => write!(f, "Request body must contain 'name'"),
            Self::FolderNotFound(_) => write!(f, "folder doesn't exist"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FolderServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FolderServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Body of `POST /folders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFolderRequest {
    #[serde(default)]
    pub name: BodyField<String>,
}

/// Body of `PATCH /folders/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFolderRequest {
    #[serde(default)]
    pub name: BodyField<String>,
}

/// Output shape of a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderView {
    pub id: FolderId,
    pub name: String,
}

impl From<&Folder> for FolderView {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: sanitize(&folder.name),
        }
    }
}

/// Folder service facade over a repository implementation.
pub struct FolderService<R: FolderRepository> {
    repo: R,
}

impl<R: FolderRepository> FolderService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all folders as sanitized views.
    pub fn list_folders(&self) -> Result<Vec<FolderView>, FolderServiceError> {
        let folders = self.repo.list_folders()?;
        Ok(folders.iter().map(FolderView::from).collect())
    }

    /// Gets one folder view.
    pub fn get_folder(&self, id: FolderId) -> Result<FolderView, FolderServiceError> {
        self.repo
            .get_folder(id)?
            .map(|folder| FolderView::from(&folder))
            .ok_or(FolderServiceError::FolderNotFound(id))
    }

    /// Validates and inserts one folder.
    pub fn create_folder(
        &self,
        request: CreateFolderRequest,
    ) -> Result<FolderView, FolderServiceError> {
        let new_folder = validate_new_folder(request)?;
        let folder = self.repo.insert_folder(&new_folder)?;
        info!(
            "event=folder_create module=service status=ok folder_id={}",
            folder.id
        );
        Ok(FolderView::from(&folder))
    }

    /// Applies a partial update to one folder.
    pub fn update_folder(
        &self,
        id: FolderId,
        request: UpdateFolderRequest,
    ) -> Result<(), FolderServiceError> {
        let patch = validate_folder_patch(request)?;
        if self.repo.update_folder(id, &patch)? == 0 {
            return Err(FolderServiceError::FolderNotFound(id));
        }
        Ok(())
    }

    /// Deletes one folder together with its notes.
    pub fn delete_folder(&self, id: FolderId) -> Result<(), FolderServiceError> {
        if self.repo.delete_folder(id)? == 0 {
            return Err(FolderServiceError::FolderNotFound(id));
        }
        info!("event=folder_delete module=service status=ok folder_id={id}");
        Ok(())
    }
}

/// Checks a create body and converts it to an insert shape.
pub fn validate_new_folder(request: CreateFolderRequest) -> Result<NewFolder, FolderServiceError> {
    let name = request
        .name
        .into_present()
        .ok_or(FolderServiceError::MissingField("name"))?;
    if name.is_empty() {
        return Err(FolderServiceError::EmptyName);
    }
    Ok(NewFolder { name })
}

/// Checks a patch body; falsy values count as not supplied.
pub fn validate_folder_patch(
    request: UpdateFolderRequest,
) -> Result<FolderPatch, FolderServiceError> {
    let patch = FolderPatch {
        name: request.name.into_present().filter(|name| !name.is_empty()),
    };
    if patch.is_empty() {
        return Err(FolderServiceError::NoUpdatableFields);
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::{
        validate_folder_patch, validate_new_folder, CreateFolderRequest, FolderServiceError,
        UpdateFolderRequest,
    };
    use crate::model::field::BodyField;

    #[test]
    fn create_rejects_missing_and_null_name() {
        for name in [BodyField::Absent, BodyField::Null] {
            let err = validate_new_folder(CreateFolderRequest { name }).unwrap_err();
            assert!(matches!(err, FolderServiceError::MissingField("name")));
            assert_eq!(err.to_string(), "Missing 'name' in request body");
        }
    }

    #[test]
    fn create_rejects_empty_name() {
        let err = validate_new_folder(CreateFolderRequest {
            name: BodyField::Present(String::new()),
        })
        .unwrap_err();
        assert!(matches!(err, FolderServiceError::EmptyName));
    }

    #[test]
    fn patch_treats_empty_name_as_absent() {
        let err = validate_folder_patch(UpdateFolderRequest {
            name: BodyField::Present(String::new()),
        })
        .unwrap_err();
        assert!(matches!(err, FolderServiceError::NoUpdatableFields));

        let patch = validate_folder_patch(UpdateFolderRequest {
            name: BodyField::Present("Renamed".to_string()),
        })
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("Renamed"));
    }
}
