//! In-memory store for tests and ephemeral use.

use std::sync::RwLock;

use super::{GeometryStore, PersistedGeometryRecord, StorageError, StorageResult};
use crate::geometry::Geometry;

/// In-memory geometry store.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<PersistedGeometryRecord>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an existing record, e.g. one carrying a hand-picked
    /// timestamp.
    pub fn insert(&self, record: PersistedGeometryRecord) {
        if let Ok(mut records) = self.records.write() {
            records.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GeometryStore for MemoryStore {
    fn save(&self, geometry: &Geometry) -> StorageResult<PersistedGeometryRecord> {
        let record = PersistedGeometryRecord::new(geometry)?;
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        records.push(record.clone());
        Ok(record)
    }

    fn load_all(&self) -> StorageResult<Vec<PersistedGeometryRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        let mut all = records.clone();
        all.sort_by_key(|record| record.created_at);
        Ok(all)
    }
}
