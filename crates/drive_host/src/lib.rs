//! Typed host-domain contracts and shared models for the drive UI.
//!
//! This crate is the API-first boundary between the drive runtime and its external collaborators:
//! the document store holding entry metadata, the blob store holding file bytes, URL opening, and
//! settings persistence. Browser adapters live in `drive_host_web`; vendor-backed stores plug in
//! behind the same traits.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod delay;
pub mod entry;
pub mod host;
pub mod path;
pub mod settings;
pub mod store;
pub mod time;
pub mod url_opener;

pub use config::{
    load_config_with, save_config_with, DriveConfig, UploadBackendKind, DRIVE_CONFIG_KEY,
};
pub use delay::{Delay, DelayFuture, ImmediateDelay};
pub use entry::{DriveEntry, EntryFilter, EntryKind, LocalFile, NewEntry};
pub use host::DriveHostServices;
pub use path::{DrivePath, ROOT_FOLDER_LABEL};
pub use settings::{MemorySettingsStore, NoopSettingsStore, SettingsFuture, SettingsStore};
pub use store::{
    BlobFuture, BlobStore, DocumentFuture, DocumentStore, MemoryBlobStore, MemoryDocumentStore,
    NoopBlobStore, NoopDocumentStore, SnapshotListener, Subscription, UploadProgress,
};
pub use time::{next_entry_id, unix_time_ms_now};
pub use url_opener::{MemoryUrlOpener, NoopUrlOpener, UrlOpener, UrlOpenerFuture};
