//! Blob-store contract for file bytes.

use std::{cell::RefCell, collections::BTreeMap, fmt, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`BlobStore`] async methods.
pub type BlobFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Progress snapshot reported while bytes are streamed to the blob store.
pub struct UploadProgress {
    /// Bytes accepted so far.
    pub bytes_transferred: u64,
    /// Total bytes of the upload.
    pub total_bytes: u64,
}

impl UploadProgress {
    /// Whole percent transferred, clamped to `0..=100`. An empty upload counts as complete.
    pub fn percent(self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        let transferred = self.bytes_transferred.min(self.total_bytes);
        ((transferred * 100) / self.total_bytes) as u8
    }
}

/// Host service for file bytes keyed by `folder path + file name`.
pub trait BlobStore {
    /// Streams `bytes` to `key`, calling `on_progress` as bytes are accepted, and resolves to the
    /// final download URL.
    fn upload<'a>(
        &'a self,
        key: &'a str,
        bytes: &'a [u8],
        on_progress: &'a dyn Fn(UploadProgress),
    ) -> BlobFuture<'a, Result<String, String>>;

    /// Resolves the download URL of an existing blob.
    fn download_url<'a>(&'a self, key: &'a str) -> BlobFuture<'a, Result<String, String>>;

    /// Deletes a blob.
    fn delete<'a>(&'a self, key: &'a str) -> BlobFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op blob store for unsupported targets and failure-path tests.
pub struct NoopBlobStore;

impl NoopBlobStore {
    fn unavailable(op: &str) -> String {
        format!("blob store unavailable: {op}")
    }
}

impl BlobStore for NoopBlobStore {
    fn upload<'a>(
        &'a self,
        _key: &'a str,
        _bytes: &'a [u8],
        _on_progress: &'a dyn Fn(UploadProgress),
    ) -> BlobFuture<'a, Result<String, String>> {
        Box::pin(async { Err(Self::unavailable("upload")) })
    }

    fn download_url<'a>(&'a self, _key: &'a str) -> BlobFuture<'a, Result<String, String>> {
        Box::pin(async { Err(Self::unavailable("download_url")) })
    }

    fn delete<'a>(&'a self, _key: &'a str) -> BlobFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unavailable("delete")) })
    }
}

/// Default chunk size used by [`MemoryBlobStore`] progress reporting.
const DEFAULT_CHUNK_BYTES: usize = 64 * 1024;
const MEMORY_URL_PREFIX: &str = "memory://drive";

#[derive(Default)]
struct MemoryBlobs {
    blobs: BTreeMap<String, Vec<u8>>,
    deleted: Vec<String>,
}

#[derive(Clone)]
/// In-memory blob store that reports progress per chunk.
pub struct MemoryBlobStore {
    inner: Rc<RefCell<MemoryBlobs>>,
    chunk_bytes: usize,
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_BYTES)
    }
}

impl MemoryBlobStore {
    /// Builds a store that reports progress every `chunk_bytes` bytes.
    pub fn with_chunk_size(chunk_bytes: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryBlobs::default())),
            chunk_bytes: chunk_bytes.max(1),
        }
    }

    /// Returns a stored blob's bytes.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.borrow().blobs.get(key).cloned()
    }

    /// Returns `true` when a blob exists at `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().blobs.contains_key(key)
    }

    /// Keys passed to successful [`BlobStore::delete`] calls, in call order.
    pub fn deleted_keys(&self) -> Vec<String> {
        self.inner.borrow().deleted.clone()
    }

    fn url_for(key: &str) -> String {
        format!("{MEMORY_URL_PREFIX}{key}")
    }
}

impl fmt::Debug for MemoryBlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBlobStore")
            .field("blobs", &self.inner.borrow().blobs.len())
            .field("chunk_bytes", &self.chunk_bytes)
            .finish()
    }
}

impl BlobStore for MemoryBlobStore {
    fn upload<'a>(
        &'a self,
        key: &'a str,
        bytes: &'a [u8],
        on_progress: &'a dyn Fn(UploadProgress),
    ) -> BlobFuture<'a, Result<String, String>> {
        Box::pin(async move {
            if key.is_empty() || key.ends_with('/') {
                return Err(format!("invalid blob key: {key:?}"));
            }
            let total_bytes = bytes.len() as u64;
            let mut stored = Vec::with_capacity(bytes.len());
            on_progress(UploadProgress {
                bytes_transferred: 0,
                total_bytes,
            });
            for chunk in bytes.chunks(self.chunk_bytes) {
                stored.extend_from_slice(chunk);
                on_progress(UploadProgress {
                    bytes_transferred: stored.len() as u64,
                    total_bytes,
                });
            }
            self.inner
                .borrow_mut()
                .blobs
                .insert(key.to_string(), stored);
            Ok(Self::url_for(key))
        })
    }

    fn download_url<'a>(&'a self, key: &'a str) -> BlobFuture<'a, Result<String, String>> {
        Box::pin(async move {
            if self.contains(key) {
                Ok(Self::url_for(key))
            } else {
                Err(format!("blob not found: {key}"))
            }
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BlobFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            if inner.blobs.remove(key).is_none() {
                return Err(format!("blob not found: {key}"));
            }
            inner.deleted.push(key.to_string());
            Ok(())
        })
    }
}
