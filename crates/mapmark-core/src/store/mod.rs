//! Geometry persistence.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::geometry::{Geometry, GeometryError};
use crate::overlay::Graphic;
use crate::symbol::Symbol;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<GeometryError> for StorageError {
    fn from(err: GeometryError) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// One saved geometry. Records are append-only: never edited, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedGeometryRecord {
    /// Unique identifier, generated once at save time.
    pub id: Uuid,
    /// Geometry encoded as GeoJSON text.
    pub geometry: String,
    /// Creation time; display order is ascending.
    pub created_at: DateTime<Utc>,
}

impl PersistedGeometryRecord {
    /// Build a fresh record for a geometry, assigning id and timestamp.
    pub fn new(geometry: &Geometry) -> Result<Self, GeometryError> {
        Ok(Self {
            id: Uuid::new_v4(),
            geometry: geometry.to_json()?,
            created_at: Utc::now(),
        })
    }

    /// Decode the stored geometry text.
    pub fn decode(&self) -> Result<Geometry, GeometryError> {
        Geometry::from_json(&self.geometry)
    }
}

/// Trait for geometry persistence backends.
///
/// All operations are synchronous: a save is one blocking call made from
/// the UI event that triggered it, and there is never more than one in
/// flight.
pub trait GeometryStore {
    /// Serialize and append a geometry, returning the new record.
    fn save(&self, geometry: &Geometry) -> StorageResult<PersistedGeometryRecord>;

    /// All records, ordered by creation timestamp ascending regardless of
    /// insertion order.
    fn load_all(&self) -> StorageResult<Vec<PersistedGeometryRecord>>;
}

/// Decode saved records into displayable graphics, styled by geometry type.
///
/// The returned iterator is lazy over the loaded records and can be
/// restarted by calling again. Records whose geometry text no longer
/// parses are skipped with a warning rather than surfaced as errors.
pub fn saved_graphics(
    store: &dyn GeometryStore,
) -> StorageResult<impl Iterator<Item = Graphic> + use<>> {
    let records = store.load_all()?;
    Ok(records.into_iter().filter_map(|record| {
        match record.decode() {
            Ok(geometry) => {
                let symbol = Symbol::finalized(&geometry);
                Some(Graphic::new(geometry, symbol))
            }
            Err(err) => {
                log::warn!("Skipping undecodable record {}: {}", record.id, err);
                None
            }
        }
    }))
}
