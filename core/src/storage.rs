//! Key-value string storage used for anything that must outlive the process.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::*;

/// Associates a value type with its namespaced storage key.
pub trait StorageKey {
    const KEY: &'static str;
}

pub trait StorageBackend {
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove_item(&mut self, key: &str) -> io::Result<()>;
}

/// Loads a value from its key. Missing keys, unreadable storage and corrupt contents all fall back to the default.
pub fn load_or_default<T, S>(storage: &S) -> T
where
    T: StorageKey + DeserializeOwned + Default,
    S: StorageBackend + ?Sized,
{
    match storage.get_item(T::KEY) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => return value,
            Err(err) => log::warn!("Discarding corrupt {} contents: {}", T::KEY, err),
        },
        Ok(None) => log::debug!("No {} stored yet", T::KEY),
        Err(err) => log::warn!("Could not read {}: {}", T::KEY, err),
    }
    T::default()
}

pub fn save<T, S>(value: &T, storage: &mut S) -> core::result::Result<(), StorageError>
where
    T: StorageKey + Serialize,
    S: StorageBackend + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set_item(T::KEY, &json)?;
    Ok(())
}

/// Volatile storage, for tests and hosts without a disk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> io::Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory, created on first write.
#[derive(Clone, Debug, PartialEq)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }

    fn remove_item(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
