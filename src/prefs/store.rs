// src/prefs/store.rs
// =============================================================================
// Key-value preference storage.
//
// The search pipeline only needs three scalar-ish lookups (an integer, a
// flag and a list of strings), so the store is a tiny trait. Two
// implementations ship with the crate:
//
// - MemoryPreferenceStore: a map in memory, used by tests and embedders
// - JsonFilePreferenceStore: the same map persisted to a JSON file, used by
//   the CLI
//
// Reads never fail: a missing key or a value of the wrong type yields the
// caller's default. Writes can fail when the file can't be written.
// =============================================================================

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub trait PreferenceStore: Send {
    fn get_int(&self, key: &str, default: i64) -> i64;
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn get_string_list(&self, key: &str, default: &[String]) -> Vec<String>;

    fn set_int(&mut self, key: &str, value: i64) -> Result<()>;
    fn set_bool(&mut self, key: &str, value: bool) -> Result<()>;
    fn set_string_list(&mut self, key: &str, value: &[String]) -> Result<()>;
}

// A stored value
//
// #[serde(untagged)] keeps the JSON file readable: plain numbers, booleans
// and arrays instead of {"Int": 5}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    List(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn mismatch(key: &str, expected: &str) {
        tracing::warn!(key, expected, "stored preference has the wrong type, using default");
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(PrefValue::Int(value)) => *value,
            Some(_) => {
                Self::mismatch(key, "int");
                default
            }
            None => default,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(PrefValue::Bool(value)) => *value,
            Some(_) => {
                Self::mismatch(key, "bool");
                default
            }
            None => default,
        }
    }

    fn get_string_list(&self, key: &str, default: &[String]) -> Vec<String> {
        match self.values.get(key) {
            Some(PrefValue::List(values)) => values.clone(),
            Some(_) => {
                Self::mismatch(key, "string list");
                default.to_vec()
            }
            None => default.to_vec(),
        }
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.values.insert(key.to_string(), PrefValue::Int(value));
        Ok(())
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.values.insert(key.to_string(), PrefValue::Bool(value));
        Ok(())
    }

    fn set_string_list(&mut self, key: &str, value: &[String]) -> Result<()> {
        self.values
            .insert(key.to_string(), PrefValue::List(value.to_vec()));
        Ok(())
    }
}

// Preferences persisted as a flat JSON object
//
// The whole file is rewritten after every set. A missing file is treated as
// an empty store.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    memory: MemoryPreferenceStore,
}

impl JsonFilePreferenceStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                SearchError::Preferences(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(SearchError::Preferences(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "loaded preferences");

        Ok(Self {
            path,
            memory: MemoryPreferenceStore { values },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.memory.values)
            .map_err(|e| SearchError::Preferences(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SearchError::Preferences(format!("{}: {}", parent.display(), e)))?;
        }

        std::fs::write(&self.path, json)
            .map_err(|e| SearchError::Preferences(format!("{}: {}", self.path.display(), e)))
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.memory.get_int(key, default)
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.memory.get_bool(key, default)
    }

    fn get_string_list(&self, key: &str, default: &[String]) -> Vec<String> {
        self.memory.get_string_list(key, default)
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.memory.set_int(key, value)?;
        self.persist()
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.memory.set_bool(key, value)?;
        self.persist()
    }

    fn set_string_list(&mut self, key: &str, value: &[String]) -> Result<()> {
        self.memory.set_string_list(key, value)?;
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_defaults_when_missing() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get_int("minStars", 0), 0);
        assert!(!store.get_bool("searchByLanguage", false));
        assert!(store.get_string_list("selectedLanguages", &[]).is_empty());
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryPreferenceStore::new();
        store.set_int("minStars", 50).unwrap();
        store.set_bool("searchByLanguage", true).unwrap();
        store
            .set_string_list("selectedLanguages", &["Go".to_string()])
            .unwrap();

        assert_eq!(store.get_int("minStars", 0), 50);
        assert!(store.get_bool("searchByLanguage", false));
        assert_eq!(store.get_string_list("selectedLanguages", &[]), vec!["Go"]);
    }

    #[test]
    fn test_wrong_type_falls_back_to_default() {
        let mut store = MemoryPreferenceStore::new();
        store.set_bool("minStars", true).unwrap();
        assert_eq!(store.get_int("minStars", 7), 7);
    }

    #[test]
    fn test_json_file_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = JsonFilePreferenceStore::open(&path).unwrap();
        store.set_int("minStars", 100).unwrap();
        store
            .set_string_list("selectedLanguages", &["Rust".to_string(), "C".to_string()])
            .unwrap();

        let reopened = JsonFilePreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.get_int("minStars", 0), 100);
        assert_eq!(
            reopened.get_string_list("selectedLanguages", &[]),
            vec!["Rust", "C"]
        );
    }

    #[test]
    fn test_json_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferenceStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.get_int("minStars", 3), 3);
    }

    #[test]
    fn test_json_file_garbage_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFilePreferenceStore::open(&path).unwrap_err();
        assert!(matches!(err, SearchError::Preferences(_)));
    }
}
