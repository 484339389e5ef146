//! Where the favorites collection lives between runs.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::domain::Recipe;

/// Key of the slot holding the favorites collection.
pub const FAVORITES_KEY: &str = "recipe-favorites";

/// Errors reading or writing the favorites slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored content is not a recipe list.
    #[error("Malformed favorites data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Storage task failed: {0}")]
    Task(String),
}

/// Persistence interface for the favorites collection.
#[async_trait]
pub trait FavoritesStorage: Send + Sync + std::fmt::Debug {
    /// Read the stored collection. An absent slot is an empty collection.
    async fn load(&self) -> Result<Vec<Recipe>, StorageError>;

    /// Replace the stored collection.
    async fn save(&self, favorites: &[Recipe]) -> Result<(), StorageError>;
}

/// Key-value JSON file, one string value per key, like browser local storage.
///
/// ```json
/// { "recipe-favorites": "[{\"id\":\"recipe-…\", …}]" }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    key: String,
}

impl JsonFileStorage {
    /// Storage at `path` using the [`FAVORITES_KEY`] slot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, FAVORITES_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole key-value file; a missing file is empty.
    ///
    /// Values of other keys are kept as-is, whatever their JSON type.
    fn read_entries(path: &Path) -> Result<Map<String, Value>, StorageError> {
        match std::fs::read_to_string(path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Map::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_slot(path: &Path, key: &str, value: String) -> Result<(), StorageError> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut entries = Self::read_entries(path).unwrap_or_else(|e| {
            tracing::warn!(
                name: "favorites.storage.reset",
                path = %path.display(),
                error = %e,
                "Storage file unreadable, starting a fresh one"
            );
            Map::new()
        });
        entries.insert(key.to_string(), Value::String(value));

        let mut temp = NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(&mut temp, &entries)?;
        temp.flush()?;
        temp.persist(path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl FavoritesStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<Recipe>, StorageError> {
        let path = self.path.clone();
        let key = self.key.clone();

        tokio::task::spawn_blocking(move || {
            let entries = Self::read_entries(&path)?;
            match entries.get(&key) {
                Some(Value::String(value)) => Ok(serde_json::from_str(value)?),
                // Also accept a slot holding the array itself.
                Some(other) => Ok(serde_json::from_value(other.clone())?),
                None => Ok(Vec::new()),
            }
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }

    async fn save(&self, favorites: &[Recipe]) -> Result<(), StorageError> {
        let value = serde_json::to_string(favorites)?;
        let path = self.path.clone();
        let key = self.key.clone();

        tokio::task::spawn_blocking(move || Self::write_slot(&path, &key, value))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

/// In-process slot holding the raw serialized value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with raw content, which need not be valid.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// Current raw content of the slot.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl FavoritesStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<Recipe>, StorageError> {
        match self.raw() {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, favorites: &[Recipe]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(favorites)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw);
        Ok(())
    }
}
