//! Main application entry point.

use std::sync::Arc;

use mapmark_core::{FileStore, GeometryStore, MemoryStore};
use mapmark_view::{ApiKey, Basemap, BasemapStyle};

fn main() -> eframe::Result {
    env_logger::init();
    log::info!("Starting Mapmark");

    let api_key = ApiKey::from_env();
    if api_key.is_empty() {
        log::warn!(
            "{} is not set; the basemap service will reject tile requests",
            ApiKey::ENV_VAR
        );
    }
    let basemap = Basemap::new(BasemapStyle::Topographic, api_key);

    let store: Arc<dyn GeometryStore> = match FileStore::default_location() {
        Ok(store) => {
            log::info!("Storing geometries in {}", store.base_path().display());
            Arc::new(store)
        }
        Err(err) => {
            log::warn!("Falling back to in-memory store: {}", err);
            Arc::new(MemoryStore::new())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Mapmark")
            .with_inner_size([900.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "mapmark",
        options,
        Box::new(move |_cc| Ok(Box::new(mapmark_app::MapmarkApp::new(store, basemap)))),
    )
}
