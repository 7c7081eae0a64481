//! Mapmark Core Library
//!
//! GUI-free domain logic for the Mapmark map-annotation tool: the geometry
//! model and its JSON codec, the draw-session state machine, overlays and
//! symbols, and the geometry store.

pub mod geometry;
pub mod overlay;
pub mod session;
pub mod store;
pub mod symbol;

pub use geometry::{Geometry, GeometryError, MapPoint};
pub use overlay::{Graphic, Overlay};
pub use session::{CreationMode, DrawSession, SessionState};
pub use store::{
    FileStore, GeometryStore, MemoryStore, PersistedGeometryRecord, StorageError, saved_graphics,
};
pub use symbol::{Rgba, Symbol};
