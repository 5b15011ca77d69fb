//! Drive runtime configuration and its settings-store persistence.

use serde::{Deserialize, Serialize};

use crate::settings::SettingsStore;

/// Settings key holding the serialized [`DriveConfig`].
pub const DRIVE_CONFIG_KEY: &str = "clouddrive.config.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Upload backend used by the orchestrator.
pub enum UploadBackendKind {
    /// Stream bytes to the blob store and record a document per file.
    #[default]
    Store,
    /// Local progress simulation that never contacts a backend.
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables for toasts, upload simulation and download progress.
pub struct DriveConfig {
    /// How long a toast stays visible.
    pub toast_duration_ms: u32,
    /// Upload backend selection.
    pub upload_backend: UploadBackendKind,
    /// Progress increment per simulated upload tick.
    pub simulated_step_percent: u8,
    /// Delay between simulated upload ticks.
    pub simulated_step_interval_ms: u32,
    /// Delay between simulated download progress ticks.
    pub download_step_interval_ms: u32,
    /// Delay before a settled upload batch is cleared from the panel.
    pub upload_panel_reset_ms: u32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
            upload_backend: UploadBackendKind::Store,
            simulated_step_percent: 10,
            simulated_step_interval_ms: 500,
            download_step_interval_ms: 100,
            upload_panel_reset_ms: 3000,
        }
    }
}

impl DriveConfig {
    /// Returns a copy with out-of-range values pulled back into range.
    pub fn sanitized(mut self) -> Self {
        self.simulated_step_percent = self.simulated_step_percent.clamp(1, 100);
        self
    }
}

/// Loads the drive config, falling back to defaults when nothing is stored.
///
/// # Errors
///
/// Returns an error when the store fails or the stored JSON does not parse.
pub async fn load_config_with<S: SettingsStore + ?Sized>(
    store: &S,
) -> Result<DriveConfig, String> {
    let Some(raw) = store.load_raw(DRIVE_CONFIG_KEY).await? else {
        return Ok(DriveConfig::default());
    };
    let config: DriveConfig = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(config.sanitized())
}

/// Serializes and saves the drive config.
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub async fn save_config_with<S: SettingsStore + ?Sized>(
    store: &S,
    config: &DriveConfig,
) -> Result<(), String> {
    let raw = serde_json::to_string(config).map_err(|e| e.to_string())?;
    store.save_raw(DRIVE_CONFIG_KEY, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::settings::{MemorySettingsStore, NoopSettingsStore};

    #[test]
    fn missing_config_uses_defaults() {
        let config = block_on(load_config_with(&NoopSettingsStore)).expect("load");
        assert_eq!(config, DriveConfig::default());
        assert_eq!(config.toast_duration_ms, 3000);
    }

    #[test]
    fn unknown_keys_from_older_configs_are_ignored() {
        let store = MemorySettingsStore::with_entry(
            DRIVE_CONFIG_KEY,
            r#"{"collection":"photos","toast_duration_ms":1200}"#,
        );
        let config = block_on(load_config_with(&store)).expect("load");
        assert_eq!(
            config,
            DriveConfig {
                toast_duration_ms: 1200,
                ..DriveConfig::default()
            }
        );
        let saved = serde_json::to_value(&config).expect("serialize");
        assert!(saved.get("collection").is_none());
    }

    #[test]
    fn partial_config_fills_defaults_and_is_sanitized() {
        let store = MemorySettingsStore::with_entry(
            DRIVE_CONFIG_KEY,
            r#"{"upload_backend":"simulated","simulated_step_percent":0}"#,
        );
        let config = block_on(load_config_with(&store)).expect("load");
        assert_eq!(config.upload_backend, UploadBackendKind::Simulated);
        assert_eq!(config.simulated_step_percent, 1);
        assert_eq!(config.simulated_step_interval_ms, 500);
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = MemorySettingsStore::default();
        let config = DriveConfig {
            toast_duration_ms: 1500,
            ..DriveConfig::default()
        };
        block_on(save_config_with(&store, &config)).expect("save");
        assert_eq!(block_on(load_config_with(&store)).expect("load"), config);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let store = MemorySettingsStore::with_entry(DRIVE_CONFIG_KEY, "{not json");
        assert!(block_on(load_config_with(&store)).is_err());
    }
}
