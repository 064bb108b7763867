//! Configuration loading and management
//!
//! The configuration lives in `config.json` next to the executable. It is read
//! once at startup and never written back except to seed a missing file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// File name of the persisted configuration
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Placeholder shipped in the default configuration
pub const PLACEHOLDER_WEBHOOK_URL: &str = "YOUR_DISCORD_WEBHOOK_URL_HERE";

const DEFAULT_HOTKEY: &str = "ctrl+k";
const DEFAULT_HOTKEY_CLIPBOARD: &str = "ctrl+alt+k";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord webhook endpoint that receives every message
    pub webhook_url: String,

    /// Key combination that toggles the overlay
    pub hotkey: String,

    /// Key combination that sends the clipboard
    pub hotkey_clipboard: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: PLACEHOLDER_WEBHOOK_URL.to_string(),
            hotkey: DEFAULT_HOTKEY.to_string(),
            hotkey_clipboard: DEFAULT_HOTKEY_CLIPBOARD.to_string(),
        }
    }
}

/// Reasons a config file could not be used
#[derive(Debug, thiserror::Error)]
enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from `path`, never failing
    ///
    /// A missing file is seeded with the defaults (best-effort). An unreadable
    /// or malformed file is left untouched and the defaults are used instead.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            match config.write_to(path) {
                Ok(()) => debug!(?path, "wrote default configuration"),
                Err(e) => warn!(?path, error = %e, "could not write default configuration"),
            }
            return config;
        }

        match Self::read_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(?path, error = %e, "ignoring unusable configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Path of `config.json` beside the running executable
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
            .join(CONFIG_FILE_NAME)
    }

    /// Whether the webhook URL has been changed from the shipped placeholder
    pub fn is_webhook_configured(&self) -> bool {
        let url = self.webhook_url.trim();
        !url.is_empty() && url != PLACEHOLDER_WEBHOOK_URL
    }

    fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = Config::load_from(&path);
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["webhook_url"], PLACEHOLDER_WEBHOOK_URL);
        assert_eq!(written["hotkey"], "ctrl+k");
        assert_eq!(written["hotkey_clipboard"], "ctrl+alt+k");
    }

    #[test]
    fn test_malformed_file_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let garbage = "{ \"webhook_url\": \"https://example.com\", ";
        std::fs::write(&path, garbage).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config, Config::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), garbage);
    }

    #[test]
    fn test_non_object_json_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_existing_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{"webhook_url": "https://discord.com/api/webhooks/1/abc", "hotkey": "alt+m", "hotkey_clipboard": "alt+shift+m"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.webhook_url, "https://discord.com/api/webhooks/1/abc");
        assert_eq!(config.hotkey, "alt+m");
        assert_eq!(config.hotkey_clipboard, "alt+shift+m");
        assert!(config.is_webhook_configured());
    }

    #[test]
    fn test_missing_keys_use_their_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"webhook_url": "https://example.com/hook"}"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.webhook_url, "https://example.com/hook");
        assert_eq!(config.hotkey, "ctrl+k");
        assert_eq!(config.hotkey_clipboard, "ctrl+alt+k");
    }

    #[test]
    fn test_unwritable_location_still_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join(CONFIG_FILE_NAME);

        assert_eq!(Config::load_from(&path), Config::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_placeholder_is_not_configured() {
        assert!(!Config::default().is_webhook_configured());
    }

    #[test]
    fn test_default_path_names_config_file() {
        assert!(Config::default_path().ends_with(CONFIG_FILE_NAME));
    }
}
