//! Client configuration.
//!
//! All settings live in a single `config.toml` at
//! `~/.config/spielplan/config.toml` by default. Data files (fixtures,
//! subjects, the settings document holding the access token) live under
//! the user data dir unless `data_dir` overrides it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default relay endpoint attaching provider credentials.
pub const DEFAULT_RELAY_URL: &str = "https://relay.spielplan.app/fetch";

/// Configuration for the spielplan client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Relay endpoint URL.
    pub relay_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Data directory override.
    pub data_dir: Option<PathBuf>,

    /// Aggregation window length in days.
    pub window_days: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            timeout: 15,
            data_dir: None,
            window_days: 35,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {e}"))?;
        let config =
            toml::from_str(&content).map_err(|e| format!("failed to parse config: {e}"))?;
        debug!(path = %path.display(), "loaded client config");
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spielplan")
            .join("config.toml")
    }

    /// The directory holding fixtures, subjects, and settings.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("spielplan")
        })
    }

    /// Path of the fixture store document.
    pub fn fixtures_path(&self) -> PathBuf {
        self.data_dir().join("fixtures.json")
    }

    /// Path of the subjects document.
    pub fn subjects_path(&self) -> PathBuf {
        self.data_dir().join("subjects.json")
    }

    /// Path of the settings document holding the access token.
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir().join("settings.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.relay_url, DEFAULT_RELAY_URL);
        assert_eq!(config.timeout, 15);
        assert_eq!(config.window_days, 35);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "relay_url = \"https://relay.example.test/fetch\"\nwindow_days = 14\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.relay_url, "https://relay.example.test/fetch");
        assert_eq!(config.window_days, 14);
        // Unset keys keep their defaults.
        assert_eq!(config.timeout, 15);
    }

    #[test]
    fn data_dir_override_drives_paths() {
        let config = ClientConfig {
            data_dir: Some(PathBuf::from("/tmp/spielplan-test")),
            ..Default::default()
        };
        assert_eq!(
            config.fixtures_path(),
            PathBuf::from("/tmp/spielplan-test/fixtures.json")
        );
        assert_eq!(
            config.settings_path(),
            PathBuf::from("/tmp/spielplan-test/settings.toml")
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "relay_url = [not toml").unwrap();
        assert!(ClientConfig::load_from(&path).is_err());
    }
}
