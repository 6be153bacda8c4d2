//! Key-value storage for the persisted collections.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::PersistenceError;
use crate::utils::persistence::{ensure_dir, read_optional, write_atomic};

pub const SAVES_KEY: &str = "saves";
pub const TEMPLATES_KEY: &str = "templates";
pub const ACHIEVEMENTS_KEY: &str = "achievements";
pub const USED_CLASSES_KEY: &str = "used-classes";
pub const HIDDEN_WORLDS_KEY: &str = "hidden-event-worlds";

/// Whole-document storage keyed by collection name.
pub trait Store {
    /// `None` when the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replaces the whole document under `key`.
    fn write(&mut self, key: &str, contents: &str) -> Result<(), PersistenceError>;
}

/// One pretty-printed JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open(dir: &Path) -> Result<Self, PersistenceError> {
        Ok(Self {
            dir: ensure_dir(dir)?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(read_optional(&self.path_for(key))?)
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), PersistenceError> {
        Ok(write_atomic(&self.path_for(key), contents)?)
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw documents.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            writes: 0,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), contents.to_string());
        self.writes += 1;
        Ok(())
    }
}
