use crate::error::MoodError;
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::warn;

/// Key-value text storage that every record is read from and written to.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Every stored key, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// One `<key>.json` file per record inside a data directory.
#[derive(Debug, Clone)]
pub struct DirStorage {
    dir: PathBuf,
}

impl DirStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirStorage { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for DirStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create dir {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("failed to list {}", self.dir.display()))?;
        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// In-process storage. Clones share the same map, so a write through one
/// handle is visible to every other handle on its next read.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.records.borrow().keys().cloned().collect())
    }
}

/// A record stored whole under one storage key as JSON.
pub trait Persistable: Sized + Default + Serialize + DeserializeOwned {
    fn key() -> &'static str;

    /// Missing record -> `Default`; unparseable record -> `StorageReadCorrupt`.
    fn load(storage: &dyn Storage) -> Result<Self> {
        let Some(raw) = storage.get(Self::key())? else {
            return Ok(Self::default());
        };
        let parsed = serde_json::from_str(&raw).map_err(|source| MoodError::StorageReadCorrupt {
            key: Self::key().to_string(),
            source,
        })?;
        Ok(parsed)
    }

    /// Like `load`, but any failure is logged and replaced by `Default`.
    fn load_or_default(storage: &dyn Storage) -> Self {
        match Self::load(storage) {
            Ok(v) => v,
            Err(e) => {
                warn!(key = Self::key(), error = %format!("{e:#}"), "falling back to default record");
                Self::default()
            }
        }
    }

    fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .with_context(|| format!("failed to serialize {}", Self::key()))?;
        storage.set(Self::key(), &contents)
    }
}
