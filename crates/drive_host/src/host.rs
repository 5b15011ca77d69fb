//! Host service bundle injected into the drive runtime.

use std::rc::Rc;

use crate::{
    delay::{Delay, ImmediateDelay},
    settings::{NoopSettingsStore, SettingsStore},
    store::{
        BlobStore, DocumentStore, MemoryBlobStore, MemoryDocumentStore, NoopBlobStore,
        NoopDocumentStore,
    },
    url_opener::{MemoryUrlOpener, NoopUrlOpener, UrlOpener},
};

/// Runtime-selected host services.
///
/// Environment-specific adapter selection happens before this bundle crosses into
/// `drive_runtime`, which keeps the runtime decoupled from browser and vendor details.
#[derive(Clone)]
pub struct DriveHostServices {
    /// Entry metadata store.
    pub documents: Rc<dyn DocumentStore>,
    /// File bytes store.
    pub blobs: Rc<dyn BlobStore>,
    /// Opens download links.
    pub urls: Rc<dyn UrlOpener>,
    /// Settings persistence for the config layer.
    pub settings: Rc<dyn SettingsStore>,
    /// Clock used by progress simulations and toast expiry.
    pub delay: Rc<dyn Delay>,
    /// Stable host name for diagnostics.
    pub host_name: &'static str,
}

impl DriveHostServices {
    /// Bundle backed by in-memory stores and an instant clock.
    pub fn in_memory() -> Self {
        Self {
            documents: Rc::new(MemoryDocumentStore::default()),
            blobs: Rc::new(MemoryBlobStore::default()),
            urls: Rc::new(MemoryUrlOpener::default()),
            settings: Rc::new(NoopSettingsStore),
            delay: Rc::new(ImmediateDelay),
            host_name: "memory",
        }
    }

    /// Bundle whose stores report every operation as unavailable.
    pub fn unavailable() -> Self {
        Self {
            documents: Rc::new(NoopDocumentStore),
            blobs: Rc::new(NoopBlobStore),
            urls: Rc::new(NoopUrlOpener),
            settings: Rc::new(NoopSettingsStore),
            delay: Rc::new(ImmediateDelay),
            host_name: "unavailable",
        }
    }
}

impl std::fmt::Debug for DriveHostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveHostServices")
            .field("host_name", &self.host_name)
            .finish_non_exhaustive()
    }
}
