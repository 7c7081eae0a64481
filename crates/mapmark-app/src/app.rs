//! Application state and the eframe update loop.

use std::sync::Arc;

use mapmark_core::{DrawSession, GeometryStore, Overlay, saved_graphics};
use mapmark_view::{Basemap, MapView, Viewpoint};

use crate::ui::{UiAction, toolbar};

/// The Mapmark application.
pub struct MapmarkApp {
    session: DrawSession,
    store: Arc<dyn GeometryStore>,
    basemap: Basemap,
    viewpoint: Viewpoint,
    /// Graphics re-displayed from the store; refreshed after each
    /// successful save instead of per frame.
    saved: Overlay,
}

impl MapmarkApp {
    pub fn new(store: Arc<dyn GeometryStore>, basemap: Basemap) -> Self {
        let mut app = Self {
            session: DrawSession::new(store.clone()),
            store,
            basemap,
            viewpoint: Viewpoint::default(),
            saved: Overlay::new(),
        };
        app.reload_saved();
        app
    }

    /// Re-read saved geometries from the store.
    fn reload_saved(&mut self) {
        self.saved.clear();
        match saved_graphics(self.store.as_ref()) {
            Ok(graphics) => {
                for graphic in graphics {
                    self.saved.add(graphic);
                }
            }
            Err(err) => log::error!("Failed to load saved geometries: {}", err),
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::StartSketch(mode) => self.session.select_mode(mode),
            UiAction::Cancel => self.session.cancel(),
            UiAction::Save => {
                if self.session.save().is_some() {
                    self.reload_saved();
                }
            }
        }
    }
}

impl eframe::App for MapmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(action) = toolbar(ctx, !self.session.is_idle()) {
            self.apply(action);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                // Bottom to top: saved, finalized this session, preview.
                let overlays = [
                    &self.saved,
                    self.session.finalized(),
                    self.session.preview(),
                ];
                let tap =
                    MapView::new(&self.basemap, &mut self.viewpoint, &overlays).show(ui);
                if let Some(tap) = tap {
                    self.session.handle_tap(tap.map);
                }
            });
    }
}
