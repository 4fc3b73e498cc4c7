// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Store backed by a single JSON object on disk.
//!
//! The whole file is read when the store is opened and rewritten after
//! every mutation. A missing file is an empty store. A mutation whose write
//! fails leaves the store as it was.

use super::KeyValueStore;
use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open (or start) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store {}", path.display()))?;
            match serde_json::from_str::<Value>(&json)
                .with_context(|| format!("Failed to parse store {}", path.display()))?
            {
                Value::Object(entries) => entries,
                other => bail!(
                    "Store {} must hold a JSON object, found {}",
                    path.display(),
                    kind_of(&other)
                ),
            }
        } else {
            Map::new()
        };
        log::info!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    fn flush(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write store {}", self.path.display()))?;
        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value);
        self.flush(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        if !self.entries.contains_key(key) {
            return Ok(false);
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.flush(&entries)?;
        self.entries = entries;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("b", json!({"size": 32})).unwrap();
        store.set("a", json!("hello")).unwrap();
        drop(store);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!("hello")));
        assert_eq!(store.get("b").unwrap(), Some(json!({"size": 32})));
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_remove_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("store.json")).unwrap();
        store.set("key", json!(1)).unwrap();
        assert!(store.remove("key").unwrap());
        assert!(!store.remove("key").unwrap());
        assert_eq!(store.get("key").unwrap(), None);
    }

    #[test]
    fn test_failed_set_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut store = JsonFileStore::open(blocker.join("store.json")).unwrap();
        assert!(store.set("site:example.com", json!(1)).is_err());
        assert_eq!(store.get("site:example.com").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_failed_remove_keeps_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("key", json!(1)).unwrap();

        // A directory where the file was makes the rewrite fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.remove("key").is_err());
        assert_eq!(store.get("key").unwrap(), Some(json!(1)));
    }

    #[test]
    fn test_rejects_non_object_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }
}
