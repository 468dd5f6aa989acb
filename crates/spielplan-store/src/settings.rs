//! Key/value settings collaborator.
//!
//! The provider access token lives here under [`API_TOKEN_KEY`]. Absence
//! of the token is a distinct, user-actionable state for the sync pass,
//! not an error of this store.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::StoreResult;

/// Settings key holding the schedule-provider access token.
pub const API_TOKEN_KEY: &str = "fussball_de_api_token";

/// String key/value settings.
pub trait SettingsStore: Send + Sync {
    /// Reads a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes a key; removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// In-memory settings, used in tests.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor seeding a single key.
    pub fn with(key: &str, value: &str) -> Self {
        let settings = Self::new();
        settings
            .values
            .lock()
            .expect("settings lock poisoned")
            .insert(key.to_string(), value.to_string());
        settings
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let values = self.values.lock().expect("settings lock poisoned");
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut values = self.values.lock().expect("settings lock poisoned");
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut values = self.values.lock().expect("settings lock poisoned");
        values.remove(key);
        Ok(())
    }
}

/// Settings persisted as a TOML document.
///
/// The document is read on every access; settings traffic is a handful of
/// reads per command.
#[derive(Debug)]
pub struct TomlSettings {
    path: PathBuf,
}

impl TomlSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> StoreResult<toml::Table> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn save(&self, table: &toml::Table) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(table)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SettingsStore for TomlSettings {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let table = self.load()?;
        Ok(table
            .get(key)
            .and_then(toml::Value::as_str)
            .map(String::from))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut table = self.load()?;
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
        self.save(&table)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut table = self.load()?;
        if table.remove(key).is_some() {
            self.save(&table)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let settings = MemorySettings::new();
        assert_eq!(settings.get(API_TOKEN_KEY).unwrap(), None);

        settings.set(API_TOKEN_KEY, "secret").unwrap();
        assert_eq!(
            settings.get(API_TOKEN_KEY).unwrap().as_deref(),
            Some("secret")
        );

        settings.remove(API_TOKEN_KEY).unwrap();
        assert_eq!(settings.get(API_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn toml_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let settings = TomlSettings::new(&path);
        settings.set(API_TOKEN_KEY, "secret-token").unwrap();
        settings.set("other", "value").unwrap();

        let reopened = TomlSettings::new(&path);
        assert_eq!(
            reopened.get(API_TOKEN_KEY).unwrap().as_deref(),
            Some("secret-token")
        );
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("value"));

        reopened.remove("other").unwrap();
        assert_eq!(reopened.get("other").unwrap(), None);
    }

    #[test]
    fn absent_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = TomlSettings::new(dir.path().join("nope.toml"));
        assert_eq!(settings.get(API_TOKEN_KEY).unwrap(), None);
        settings.remove(API_TOKEN_KEY).unwrap();
    }
}
