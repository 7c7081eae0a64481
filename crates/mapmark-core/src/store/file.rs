//! File-backed store for native platforms.

use std::fs;
use std::path::{Path, PathBuf};

use super::{GeometryStore, PersistedGeometryRecord, StorageError, StorageResult};
use crate::geometry::Geometry;

/// File-backed geometry store.
///
/// Keeps one JSON file per record, named by record id, inside a base
/// directory.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_path`, creating the directory if it
    /// does not exist.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create store directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Open the store in the platform data directory
    /// (`<data dir>/mapmark/geometries`).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine data directory".to_string()))?;
        Self::new(base.join("mapmark").join("geometries"))
    }

    /// The directory records are stored in.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn record_path(&self, record: &PersistedGeometryRecord) -> PathBuf {
        self.base_path.join(format!("{}.json", record.id))
    }
}

impl GeometryStore for FileStore {
    fn save(&self, geometry: &Geometry) -> StorageResult<PersistedGeometryRecord> {
        let record = PersistedGeometryRecord::new(geometry)?;
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let path = self.record_path(&record);
        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(record)
    }

    fn load_all(&self) -> StorageResult<Vec<PersistedGeometryRecord>> {
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read store directory: {}", e)))?;

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    log::warn!("Skipping unreadable {}: {}", path.display(), err);
                    continue;
                }
            };
            match serde_json::from_str::<PersistedGeometryRecord>(&text) {
                Ok(record) => records.push(record),
                Err(err) => log::warn!("Skipping malformed {}: {}", path.display(), err),
            }
        }
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }
}
