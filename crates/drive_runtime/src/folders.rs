//! New-folder flow.

use drive_host::{DocumentStore, DriveEntry, DrivePath, EntryFilter, NewEntry};
use leptos::logging;

use crate::error::DriveError;

/// Trims `raw` and rejects blank names and names containing a path separator.
///
/// # Errors
///
/// Returns [`DriveError::InvalidName`] when the trimmed name is unusable.
pub fn validate_entry_name(raw: &str) -> Result<String, DriveError> {
    let name = raw.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(DriveError::InvalidName {
            name: raw.to_string(),
        });
    }
    Ok(name.to_string())
}

/// Fails with [`DriveError::DuplicateName`] when `path` already holds an entry named `name`.
pub(crate) async fn ensure_name_free(
    documents: &dyn DocumentStore,
    path: &DrivePath,
    name: &str,
    on_store_error: impl FnOnce(String) -> DriveError,
) -> Result<(), DriveError> {
    let filter = EntryFilter::named(path.as_str(), name);
    let existing = documents.query(&filter).await.map_err(on_store_error)?;
    if existing.is_empty() {
        Ok(())
    } else {
        Err(DriveError::DuplicateName {
            name: name.to_string(),
        })
    }
}

/// Writes a folder record named `raw_name` under `path`.
///
/// # Errors
///
/// Returns [`DriveError::InvalidName`], [`DriveError::DuplicateName`], or
/// [`DriveError::CreateFolderFailure`] when the document store rejects the write.
pub async fn create_folder(
    documents: &dyn DocumentStore,
    path: &DrivePath,
    raw_name: &str,
) -> Result<DriveEntry, DriveError> {
    let name = validate_entry_name(raw_name)?;
    let store_error = |reason: String| DriveError::CreateFolderFailure {
        name: name.clone(),
        reason,
    };
    ensure_name_free(documents, path, &name, store_error).await?;
    let entry = documents
        .create(NewEntry::folder(name.clone(), path.as_str()))
        .await
        .map_err(store_error)?;
    logging::log!("created folder {}{}", path, entry.name);
    Ok(entry)
}
