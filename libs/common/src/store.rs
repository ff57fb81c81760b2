//! File-backed record storage for the planner services
//!
//! The whole collection lives in one JSON file. Every mutating operation
//! loads, modifies, and rewrites the collection under a single mutex, so a
//! concurrent writer can never observe a half-applied change or overwrite
//! one it has not seen.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::error::{StoreError, StoreResult};

/// A record that can live in a [`JsonStore`], addressed by a unique key
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Unique key of the record within the collection
    fn key(&self) -> &str;
}

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the persisted collection files
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Create a new StoreConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PLANNER_DATA_DIR`: directory for persisted collections (default: `data`)
    pub fn from_env() -> StoreResult<Self> {
        let data_dir =
            std::env::var("PLANNER_DATA_DIR").unwrap_or_else(|_| "data".to_string());

        if data_dir.is_empty() {
            return Err(StoreError::Configuration(
                "PLANNER_DATA_DIR must not be empty".to_string(),
            ));
        }

        Ok(StoreConfig {
            data_dir: PathBuf::from(data_dir),
        })
    }
}

/// File-backed JSON collection store
///
/// One mutex serializes every load-modify-save cycle; it is acquired before
/// the collection is read and released only after the rewrite completes or
/// fails.
#[derive(Debug)]
pub struct JsonStore<R> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    _record: PhantomData<R>,
}

impl<R> Clone for JsonStore<R> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            lock: Arc::clone(&self.lock),
            _record: PhantomData,
        }
    }
}

impl<R: Record> JsonStore<R> {
    /// Create a store over the given collection file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
            _record: PhantomData,
        }
    }

    /// Path of the collection file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection
    ///
    /// A missing, unreadable, or corrupt file degrades to an empty
    /// collection so that read paths stay available.
    pub async fn load_all(&self) -> Vec<R> {
        let _guard = self.lock.lock().await;
        self.read_collection().await
    }

    /// Overwrite the full collection
    pub async fn save_all(&self, records: &[R]) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        self.write_collection(records).await
    }

    /// Find a record by key, scanning the current collection
    pub async fn find(&self, key: &str) -> Option<R> {
        self.load_all().await.into_iter().find(|r| r.key() == key)
    }

    /// Insert a record, replacing any existing record with the same key
    pub async fn upsert(&self, record: R) -> StoreResult<R> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_collection().await;
        match records.iter_mut().find(|r| r.key() == record.key()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        self.write_collection(&records).await?;
        Ok(record)
    }

    /// Insert a record, failing if the key is already taken
    ///
    /// The duplicate check runs inside the same critical section as the
    /// write, so two racing inserts for one key cannot both succeed.
    pub async fn insert(&self, record: R) -> StoreResult<R> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_collection().await;
        if records.iter().any(|r| r.key() == record.key()) {
            return Err(StoreError::DuplicateKey(record.key().to_string()));
        }
        records.push(record.clone());

        self.write_collection(&records).await?;
        Ok(record)
    }

    /// Apply a mutation to the record with the given key and persist it
    ///
    /// The record is re-read inside the critical section, so two updates to
    /// disjoint fields of the same record cannot clobber each other.
    pub async fn update<F, T>(&self, key: &str, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut R) -> T,
    {
        let _guard = self.lock.lock().await;

        let mut records = self.read_collection().await;
        let record = records
            .iter_mut()
            .find(|r| r.key() == key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let result = f(record);

        self.write_collection(&records).await?;
        Ok(result)
    }

    async fn read_collection(&self) -> Vec<R> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    "Failed to read collection file {}: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Failed to parse collection file {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn write_collection(&self, records: &[R]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(records).map_err(StoreError::Serialize)?;

        // Write a sibling temp file first so the collection file is replaced
        // in a single rename.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(StoreError::Io)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(StoreError::Io)?;

        Ok(())
    }
}

/// Initialize a JSON collection store
///
/// # Arguments
/// * `config` - Store configuration
/// * `file_name` - Name of the collection file inside the data directory
///
/// # Returns
/// * `StoreResult<JsonStore<R>>` - Store over the seeded collection file
pub async fn init_store<R: Record>(
    config: &StoreConfig,
    file_name: &str,
) -> StoreResult<JsonStore<R>> {
    info!(
        "Initializing record store in {}",
        config.data_dir.display()
    );

    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .map_err(StoreError::Io)?;

    let path = config.data_dir.join(file_name);
    if !tokio::fs::try_exists(&path).await.map_err(StoreError::Io)? {
        tokio::fs::write(&path, b"[]").await.map_err(StoreError::Io)?;
        info!("Seeded empty collection file {}", path.display());
    }

    info!("Record store initialized successfully");
    Ok(JsonStore::new(path))
}

/// Check store accessibility
///
/// # Arguments
/// * `store` - Record store to check
///
/// # Returns
/// * `StoreResult<bool>` - True if the collection file is reachable, false otherwise
pub async fn health_check<R: Record>(store: &JsonStore<R>) -> StoreResult<bool> {
    match tokio::fs::try_exists(store.path()).await {
        Ok(true) => {
            info!("Record store health check successful");
            Ok(true)
        }
        Ok(false) => {
            error!(
                "Record store health check failed: {} does not exist",
                store.path().display()
            );
            Ok(false)
        }
        Err(e) => {
            error!("Record store health check failed: {}", e);
            Ok(false)
        }
    }
}
