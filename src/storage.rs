use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::models::{Task, TASKS_KEY};

const VALUE_EXT: &str = "json";

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "io error: {err}"),
            StorageError::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        StorageError::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        StorageError::Json(value)
    }
}

/// Directory-backed key/value store. Every key maps to one `<key>.json` file
/// holding the raw serialized value.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Returns `None` when nothing was ever stored under `key`.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.read_item(key)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StorageError::Io(std::io::Error::new(ErrorKind::InvalidData, e))),
            None => Ok(None),
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_atomic(self.item_path(key), value.as_bytes())
    }

    /// Missing or undecodable values yield an empty list. Read failures are
    /// returned as-is so the caller never overwrites data it could not see.
    pub fn load_tasks(&self) -> Result<Vec<Task>, StorageError> {
        match self.try_load_tasks() {
            Ok(tasks) => Ok(tasks.unwrap_or_default()),
            Err(StorageError::Json(error)) => {
                log::debug!("stored tasks undecodable, starting empty: {error}");
                Ok(Vec::new())
            }
            Err(error) => Err(error),
        }
    }

    pub fn try_load_tasks(&self) -> Result<Option<Vec<Task>>, StorageError> {
        match self.read_item(TASKS_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(tasks)?;
        self.set_item(TASKS_KEY, &json)
    }

    fn read_item(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.item_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{VALUE_EXT}"))
    }

    fn write_atomic(&self, path: PathBuf, bytes: &[u8]) -> Result<(), StorageError> {
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(temp_path, path)?;
        Ok(())
    }
}
