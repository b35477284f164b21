//! Persistent key/value cache backing both inference pipelines.
//!
//! One JSON document per cache, loaded wholesale at construction, mutated in
//! memory, rewritten wholesale on flush. A missing file is an empty cache.
//! No eviction: schema and merchant vocabularies stay small relative to
//! transaction volume.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// In-memory map bound to a pretty-printed JSON file on disk.
///
/// Owned by the component that constructs it (schema detector, categorizer);
/// concurrent processes sharing one path are not supported.
#[derive(Debug)]
pub struct JsonCache<V> {
    path: PathBuf,
    entries: HashMap<String, V>,
}

impl<V: Serialize + DeserializeOwned> JsonCache<V> {
    /// Load the cache file, or start empty if it does not exist.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parse {}", path.display()))?
        } else {
            HashMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn put(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite the whole file. Creates the parent directory on first flush.
    pub fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}
