//! Host bundle assembly for the browser entry layer.

use std::rc::Rc;

use drive_host::{DriveHostServices, MemoryBlobStore, MemoryDocumentStore};

use crate::{TimeoutDelay, WebSettingsStore, WebUrlOpener};

/// Returns the stable name of the browser host bundle.
pub fn host_strategy_name() -> &'static str {
    "browser"
}

/// Builds the service bundle used by the browser build.
///
/// Entry records and blobs live in memory for the lifetime of the page.
pub fn build_host_services() -> DriveHostServices {
    DriveHostServices {
        documents: Rc::new(MemoryDocumentStore::default()),
        blobs: Rc::new(MemoryBlobStore::default()),
        urls: Rc::new(WebUrlOpener),
        settings: Rc::new(WebSettingsStore),
        delay: Rc::new(TimeoutDelay),
        host_name: host_strategy_name(),
    }
}

#[cfg(test)]
mod tests {
    use drive_host::{load_config_with, DriveConfig};
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn browser_bundle_falls_back_to_default_config_natively() {
        let services = build_host_services();
        assert_eq!(services.host_name, "browser");
        let config = block_on(load_config_with(services.settings.as_ref())).expect("config");
        assert_eq!(config, DriveConfig::default());
    }

    #[test]
    fn url_opening_fails_outside_the_browser() {
        let services = build_host_services();
        let err = block_on(services.urls.open_url("memory://drive/a.png")).expect_err("native");
        assert!(err.contains("outside the browser"));
    }
}
