//! Key/value settings persistence used by the config layer.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`SettingsStore`] async methods.
pub type SettingsFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service storing raw JSON text per settings key.
pub trait SettingsStore {
    /// Loads the raw JSON stored under `key`.
    fn load_raw<'a>(&'a self, key: &'a str) -> SettingsFuture<'a, Result<Option<String>, String>>;

    /// Stores raw JSON under `key`.
    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> SettingsFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Settings store that holds nothing; every load misses and every save succeeds.
pub struct NoopSettingsStore;

impl SettingsStore for NoopSettingsStore {
    fn load_raw<'a>(&'a self, _key: &'a str) -> SettingsFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_raw<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> SettingsFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory settings store.
pub struct MemorySettingsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySettingsStore {
    /// Builds a store holding a single `key` -> `raw_json` pair.
    pub fn with_entry(key: &str, raw_json: &str) -> Self {
        let store = Self::default();
        store
            .inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        store
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load_raw<'a>(&'a self, key: &'a str) -> SettingsFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> SettingsFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }
}
