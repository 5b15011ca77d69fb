//! Host-side runtime helpers for executing reducer effects.
//!
//! The reducer stays pure; everything that touches the injected services (subscriptions, uploads,
//! store writes, timers) runs here behind [`DriveHostContext`].

mod boot;
mod effects;

use std::{cell::RefCell, rc::Rc};

use drive_host::{DriveConfig, DriveHostServices};
use leptos::Callback;

use crate::{
    entry_list::EntryListStore,
    reducer::{DriveAction, RuntimeEffect},
    runtime_context::DriveRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle plus runtime-owned host state.
pub struct DriveHostContext {
    services: DriveHostServices,
    config: Rc<RefCell<DriveConfig>>,
    entry_list: EntryListStore,
}

impl DriveHostContext {
    /// Wraps `services`, starting from the default config until boot loads the stored one.
    pub fn new(services: DriveHostServices) -> Self {
        let entry_list = EntryListStore::new(services.documents.clone());
        Self {
            services,
            config: Rc::new(RefCell::new(DriveConfig::default())),
            entry_list,
        }
    }

    /// Returns the injected services.
    pub fn services(&self) -> &DriveHostServices {
        &self.services
    }

    /// Returns the active config.
    pub fn config(&self) -> DriveConfig {
        self.config.borrow().clone()
    }

    pub(crate) fn replace_config(&self, config: DriveConfig) {
        *self.config.borrow_mut() = config.sanitized();
    }

    /// Returns the live entry list for the current folder.
    pub fn entry_list(&self) -> EntryListStore {
        self.entry_list.clone()
    }

    /// Returns the stable name of the injected host bundle.
    pub fn host_name(&self) -> &'static str {
        self.services.host_name
    }

    /// Loads the stored config and opens the root folder.
    pub fn install_boot(&self, dispatch: Callback<DriveAction>) {
        boot::install_boot(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DriveRuntimeContext, effect: RuntimeEffect) {
        effects::run_runtime_effect(self.clone(), runtime, effect);
    }

    /// Releases the entry list subscription.
    pub fn shutdown(&self) {
        self.entry_list.stop();
    }
}

impl std::fmt::Debug for DriveHostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveHostContext")
            .field("host_name", &self.services.host_name)
            .field("config", &self.config.borrow())
            .field("entry_list", &self.entry_list)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use drive_host::{DrivePath, MemoryDocumentStore, NewEntry, UploadBackendKind};

    use super::*;

    #[test]
    fn replaced_config_is_sanitized() {
        let host = DriveHostContext::new(DriveHostServices::in_memory());
        host.replace_config(DriveConfig {
            simulated_step_percent: 0,
            upload_backend: UploadBackendKind::Simulated,
            ..DriveConfig::default()
        });
        let config = host.config();
        assert_eq!(config.simulated_step_percent, 1);
        assert_eq!(config.upload_backend, UploadBackendKind::Simulated);
    }

    #[test]
    fn shutdown_releases_the_entry_list_subscription() {
        let documents = MemoryDocumentStore::with_records([
            NewEntry::folder("Documents", "/").into_entry("1".to_string())
        ]);
        let host = DriveHostContext::new(DriveHostServices {
            documents: Rc::new(documents.clone()),
            ..DriveHostServices::in_memory()
        });
        host.entry_list()
            .watch(&DrivePath::root(), |_, _| {})
            .expect("subscribe");
        assert_eq!(documents.listener_count(), 1);

        host.shutdown();
        assert_eq!(documents.listener_count(), 0);
    }
}
