//! Confirmed-delete flow: document record first, then the blob for file entries.

use drive_host::{BlobStore, DocumentStore, DriveEntry, EntryFilter};
use leptos::logging;

use crate::error::DriveError;

/// Deletes `entry`'s document record and, for files, its blob.
///
/// The record is looked up by exact parent path and name. When duplicates exist the record whose
/// id matches `entry.id` wins, otherwise the first match. A missing record is not an error; the
/// blob delete still runs for files. Partial failures are not compensated.
///
/// # Errors
///
/// Returns [`DriveError::DeleteFailure`] when either store call fails.
pub async fn delete_entry(
    documents: &dyn DocumentStore,
    blobs: &dyn BlobStore,
    entry: &DriveEntry,
) -> Result<(), DriveError> {
    let failure = |reason: String| DriveError::DeleteFailure {
        name: entry.name.clone(),
        reason,
    };

    let filter = EntryFilter::named(entry.path.as_str(), entry.name.as_str());
    let matches = documents.query(&filter).await.map_err(failure)?;
    let record = matches
        .iter()
        .find(|record| record.id == entry.id)
        .or_else(|| matches.first());
    match record {
        Some(record) => documents.delete(&record.id).await.map_err(failure)?,
        None => logging::warn!("no document record for {}", entry.blob_key()),
    }

    if !entry.is_folder() {
        blobs.delete(&entry.blob_key()).await.map_err(failure)?;
    }

    logging::log!("deleted {}", entry.blob_key());
    Ok(())
}
