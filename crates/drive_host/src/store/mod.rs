//! External storage collaborator contracts: entry metadata documents and file blobs.

mod blobs;
mod documents;

pub use blobs::{BlobFuture, BlobStore, MemoryBlobStore, NoopBlobStore, UploadProgress};
pub use documents::{
    DocumentFuture, DocumentStore, MemoryDocumentStore, NoopDocumentStore, SnapshotListener,
    Subscription,
};
