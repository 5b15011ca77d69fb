//! Download flow: resolve the blob URL, show simulated progress, open the link.

use drive_host::{BlobStore, Delay, DriveEntry, UrlOpener};
use leptos::logging;

use crate::error::DriveError;

const DOWNLOAD_STEP_PERCENT: u8 = 10;

/// Resolves `entry`'s download URL, reports progress from 0 to 100, then opens the URL.
///
/// # Errors
///
/// Returns [`DriveError::DownloadFailure`] for folders and for blob or URL-opener failures.
pub async fn download_entry(
    blobs: &dyn BlobStore,
    urls: &dyn UrlOpener,
    delay: &dyn Delay,
    step_interval_ms: u32,
    entry: &DriveEntry,
    on_progress: &dyn Fn(u8),
) -> Result<String, DriveError> {
    let failure = |reason: String| DriveError::DownloadFailure {
        file: entry.name.clone(),
        reason,
    };
    if entry.is_folder() {
        return Err(failure("folders cannot be downloaded".to_string()));
    }

    let url = blobs
        .download_url(&entry.blob_key())
        .await
        .map_err(failure)?;

    let mut progress = 0u8;
    on_progress(progress);
    while progress < 100 {
        delay.sleep_ms(step_interval_ms).await;
        progress = (progress + DOWNLOAD_STEP_PERCENT).min(100);
        on_progress(progress);
    }

    urls.open_url(&url).await.map_err(failure)?;
    logging::log!("opened download for {}", entry.blob_key());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use drive_host::{
        ImmediateDelay, MemoryBlobStore, MemoryUrlOpener, NewEntry, NoopBlobStore, NoopUrlOpener,
    };
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn download_opens_resolved_url_after_full_progress() {
        let blobs = MemoryBlobStore::default();
        let url = block_on(blobs.upload("/Documents/a.png", b"png", &|_| {})).expect("upload");
        let entry = NewEntry::file("a.png", "/Documents/", url.clone()).into_entry("1".into());
        let urls = MemoryUrlOpener::default();
        let seen = RefCell::new(Vec::new());

        let opened = block_on(download_entry(
            &blobs,
            &urls,
            &ImmediateDelay,
            100,
            &entry,
            &|p| seen.borrow_mut().push(p),
        ))
        .expect("download");

        assert_eq!(opened, url);
        assert_eq!(urls.opened(), vec![url]);
        let seen = seen.into_inner();
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn folders_and_store_failures_are_download_failures() {
        let folder = NewEntry::folder("Documents", "/").into_entry("1".into());
        let err = block_on(download_entry(
            &MemoryBlobStore::default(),
            &NoopUrlOpener,
            &ImmediateDelay,
            0,
            &folder,
            &|_| {},
        ))
        .expect_err("folder");
        assert!(matches!(err, DriveError::DownloadFailure { .. }));

        let file = NewEntry::file("a.png", "/", "u").into_entry("2".into());
        let err = block_on(download_entry(
            &NoopBlobStore,
            &NoopUrlOpener,
            &ImmediateDelay,
            0,
            &file,
            &|_| {},
        ))
        .expect_err("blob store unavailable");
        assert_eq!(err.toast_message(), "File download failed.");
    }
}
