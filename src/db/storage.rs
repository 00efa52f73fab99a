//! Key-value persistence for favorites and recent searches.
//!
//! Each key holds one JSON document that is read once at startup and
//! rewritten in full after every mutation.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::AppResult;

use super::RedisStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Favorites,
    RecentSearches,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Favorites => write!(f, "favorites"),
            StorageKey::RecentSearches => write!(f, "recentSearches"),
        }
    }
}

/// Persistent string store addressed by [`StorageKey`]
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the stored document, or `None` if the key was never written
    async fn get(&self, key: StorageKey) -> AppResult<Option<String>>;

    /// Replaces the stored document
    async fn set(&self, key: StorageKey, value: String) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Picks a backend from `STORAGE_URL`: `redis://` URLs use Redis, `memory`
/// keeps everything in process, anything else is a directory on disk
pub fn create_storage(config: &Config) -> anyhow::Result<Arc<dyn Storage>> {
    let url = config.storage_url.as_str();

    let storage: Arc<dyn Storage> = if url.starts_with("redis://") || url.starts_with("rediss://")
    {
        Arc::new(RedisStorage::open(url, &config.storage_namespace)?)
    } else if url == "memory" {
        Arc::new(MemoryStorage::new())
    } else {
        Arc::new(FileStorage::new(url))
    };

    tracing::info!(backend = storage.name(), location = %url, "Storage configured");

    Ok(storage)
}

/// Loads a persisted JSON array.
///
/// Missing keys, unreadable backends and malformed documents all yield an
/// empty list; the failure is logged and never propagated.
pub async fn load_list<T: DeserializeOwned>(storage: &dyn Storage, key: StorageKey) -> Vec<T> {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to read persisted list, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Discarding malformed persisted list");
            Vec::new()
        }
    }
}

/// Serializes `items` and overwrites the stored document
pub async fn save_list<T: Serialize>(
    storage: &dyn Storage,
    key: StorageKey,
    items: &[T],
) -> AppResult<()> {
    let json = serde_json::to_string(items)?;
    storage.set(key, json).await?;
    tracing::debug!(key = %key, count = items.len(), backend = storage.name(), "Persisted list");
    Ok(())
}

/// One `<key>.json` file per key inside a data directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: StorageKey) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: StorageKey, value: String) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write-then-rename so a crash never leaves a truncated document
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, self.path_for(key)).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Process-local storage; contents are lost on exit
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: StorageKey) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn set(&self, key: StorageKey, value: String) -> AppResult<()> {
        self.entries.write().await.insert(key, value);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
