//! `localStorage`-backed settings store.

use drive_host::{SettingsFuture, SettingsStore};

#[derive(Debug, Clone, Copy, Default)]
/// Browser settings store backed by `window.localStorage`.
pub struct WebSettingsStore;

impl WebSettingsStore {
    /// Loads the raw JSON stored under `key`, if any.
    pub fn load_json(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            storage.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    /// Saves raw JSON under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails.
    pub fn save_json(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(key, raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }
}

impl SettingsStore for WebSettingsStore {
    fn load_raw<'a>(&'a self, key: &'a str) -> SettingsFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.load_json(key)) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> SettingsFuture<'a, Result<(), String>> {
        Box::pin(async move { self.save_json(key, raw_json) })
    }
}
