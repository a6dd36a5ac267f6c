//! Persisted panel preferences.
//!
//! Preferences are best effort: a store that can't be read or written never
//! blocks the in-memory change, it is only logged.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// Key of the panel open/closed flag.
pub const PANEL_OPEN_KEY: &str = "tablescopePanelOpen";

const PREFERENCES_FILE: &str = "preferences.json";

/// Key/value storage for small JSON preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError>;
    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<(), PersistenceError>;
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// A single JSON object file holding every preference.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/tablescope/preferences.json`
    pub fn user_default() -> Result<Self, PersistenceError> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join("tablescope").join(PREFERENCES_FILE)))
            .ok_or(PersistenceError::Unavailable)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<serde_json::Map<String, serde_json::Value>, PersistenceError> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<(), PersistenceError> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&all)?;
        // Write to a sibling temp file, then rename over the old one.
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// The panel's open/closed flag, backed by a [`PreferenceStore`].
pub struct PanelPreference {
    store: Box<dyn PreferenceStore>,
    open: bool,
}

impl PanelPreference {
    /// Read the stored flag, falling back to `default_open`.
    pub fn load(store: Box<dyn PreferenceStore>, default_open: bool) -> Self {
        let open = match store.get(PANEL_OPEN_KEY) {
            Ok(Some(serde_json::Value::Bool(open))) => open,
            Ok(_) => default_open,
            Err(err) => {
                tracing::debug!(error = %err, "panel preference unreadable");
                default_open
            }
        };
        Self { store, open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        if let Err(err) = self.store.set(PANEL_OPEN_KEY, serde_json::Value::Bool(open)) {
            tracing::debug!(error = %err, "panel preference not saved");
        }
    }

    /// Flip the flag. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_open(!self.open);
        self.open
    }
}

impl std::fmt::Debug for PanelPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelPreference")
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, PersistenceError> {
            Err(PersistenceError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: serde_json::Value) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable)
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", serde_json::json!(true)).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(serde_json::json!(true)));
    }

    #[test]
    fn test_file_store_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get(PANEL_OPEN_KEY).unwrap(), None);
        store.set(PANEL_OPEN_KEY, serde_json::json!(true)).unwrap();
        store.set("other", serde_json::json!(3)).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get(PANEL_OPEN_KEY).unwrap(),
            Some(serde_json::json!(true))
        );
        assert_eq!(reopened.get("other").unwrap(), Some(serde_json::json!(3)));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.get(PANEL_OPEN_KEY),
            Err(PersistenceError::Corrupt(_))
        ));
    }

    #[test]
    fn test_preference_persists_toggle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);

        let mut pref = PanelPreference::load(Box::new(JsonFileStore::new(&path)), false);
        assert!(!pref.is_open());
        assert!(pref.toggle());

        let pref = PanelPreference::load(Box::new(JsonFileStore::new(&path)), false);
        assert!(pref.is_open());
    }

    #[test]
    fn test_preference_ignores_non_bool_values() {
        let mut store = MemoryStore::new();
        store.set(PANEL_OPEN_KEY, serde_json::json!("yes")).unwrap();
        let pref = PanelPreference::load(Box::new(store), true);
        assert!(pref.is_open());
    }

    #[test]
    fn test_broken_store_still_toggles() {
        let mut pref = PanelPreference::load(Box::new(BrokenStore), false);
        assert!(!pref.is_open());
        assert!(pref.toggle());
        assert!(pref.is_open());
        pref.set_open(false);
        assert!(!pref.is_open());
    }
}
