//! Mapmark map presentation: the viewpoint camera with its Web Mercator
//! projection, basemap configuration, and the egui map-view widget.

pub mod basemap;
pub mod camera;
pub mod view;

pub use basemap::{ApiKey, Basemap, BasemapStyle};
pub use camera::{MAX_SCALE, MIN_SCALE, Viewpoint};
pub use view::{MapView, Tap};
