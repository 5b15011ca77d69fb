//! User-facing failure taxonomy for drive operations.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced to the user as transient toasts.
pub enum DriveError {
    /// Blob upload or its document record failed.
    #[error("upload of {file} failed: {reason}")]
    UploadFailure {
        /// Local file name.
        file: String,
        /// Underlying store error.
        reason: String,
    },
    /// Resolving or opening a download link failed.
    #[error("download of {file} failed: {reason}")]
    DownloadFailure {
        /// Entry name.
        file: String,
        /// Underlying store error.
        reason: String,
    },
    /// Document or blob removal failed.
    #[error("delete of {name} failed: {reason}")]
    DeleteFailure {
        /// Entry name.
        name: String,
        /// Underlying store error.
        reason: String,
    },
    /// Writing a folder record failed.
    #[error("creating folder {name} failed: {reason}")]
    CreateFolderFailure {
        /// Folder name.
        name: String,
        /// Underlying store error.
        reason: String,
    },
    /// The name is blank or contains `/`.
    #[error("invalid name {name:?}")]
    InvalidName {
        /// Rejected name.
        name: String,
    },
    /// An entry with the same name already exists in the folder.
    #[error("{name} already exists in this folder")]
    DuplicateName {
        /// Rejected name.
        name: String,
    },
}

impl DriveError {
    /// Message shown in the toast for this failure.
    pub fn toast_message(&self) -> String {
        match self {
            Self::UploadFailure { .. } => "File upload failed.".to_string(),
            Self::DownloadFailure { .. } => "File download failed.".to_string(),
            Self::DeleteFailure { name, .. } => format!("Failed to delete {name}."),
            Self::CreateFolderFailure { .. } => "Folder creation failed.".to_string(),
            Self::InvalidName { .. } => "Names cannot be empty or contain '/'.".to_string(),
            Self::DuplicateName { name } => format!("{name} already exists in this folder."),
        }
    }
}
