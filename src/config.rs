/// Extension configuration
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Storage key holding the whole preference set
pub const STORAGE_KEY: &str = "tread_sites";

/// Key of the old flat domain list. Left untouched as foreign data.
pub const LEGACY_STORAGE_KEY: &str = "tread_urls";

/// Banner text used until the user writes their own
pub const DEFAULT_MESSAGE: &str = "Tread Lightly! This is a production site.";

/// Which `chrome.storage` area backs the preference set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    #[default]
    Sync,
    Local,
}

impl StorageArea {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageArea::Sync => "sync",
            StorageArea::Local => "local",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtensionConfig {
    pub storage_key: String,
    pub storage_area: StorageArea,
    pub log_level: String,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        ExtensionConfig {
            storage_key: STORAGE_KEY.to_string(),
            storage_area: StorageArea::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ExtensionConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the config object handed to an entry point. Missing or
    /// unreadable objects fall back to the defaults.
    pub fn from_js(value: JsValue) -> Self {
        if value.is_undefined() || value.is_null() {
            return ExtensionConfig::default();
        }

        serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
            log::warn!("Invalid extension config, using defaults: {:?}", e);
            ExtensionConfig::default()
        })
    }

    /// Configured log level, `Info` when the name is not recognised
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
