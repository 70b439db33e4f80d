use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::{PackError, PackResult};
use crate::core::modplatform::flame::FLAME_API_BASE;

const APP_DIR_NAME: &str = "packkit";
const SETTINGS_FILE: &str = "client_settings.json";
const APP_USER_AGENT: &str = "packkit/0.1.0";
/// Overrides the persisted API key when set.
pub const API_KEY_ENV: &str = "CURSEFORGE_API_KEY";

/// Mod platform client configuration persisted as `client_settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base: String,
    pub api_key: Option<String>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: FLAME_API_BASE.to_string(),
            api_key: None,
            user_agent: APP_USER_AGENT.to_string(),
        }
    }
}

impl ClientSettings {
    /// Load settings from `data_dir`, falling back to defaults when the file
    /// is missing or corrupt, then apply the environment override.
    pub fn load(data_dir: &Path) -> Self {
        let mut settings = load_settings_from_disk(data_dir).unwrap_or_default();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                settings.api_key = Some(key.trim().to_string());
            }
        }
        settings
    }

    pub fn save(&self, data_dir: &Path) -> PackResult<()> {
        std::fs::create_dir_all(data_dir).map_err(|source| PackError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;
        let path = data_dir.join(SETTINGS_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json).map_err(|source| PackError::Io { path, source })
    }
}

fn load_settings_from_disk(data_dir: &Path) -> Option<ClientSettings> {
    let path = data_dir.join(SETTINGS_FILE);
    let raw = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(settings) => Some(settings),
        Err(e) => {
            warn!("Corrupt settings at {:?}: {}", path, e);
            None
        }
    }
}

/// Per-user data directory, e.g. `~/.local/share/packkit`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
