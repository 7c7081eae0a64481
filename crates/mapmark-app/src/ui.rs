//! Toolbar UI.

use egui::{Align, Context, Layout, TopBottomPanel};
use mapmark_core::CreationMode;

/// Action requested from the toolbar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    StartSketch(CreationMode),
    Cancel,
    Save,
}

/// Render the toolbar.
///
/// While idle it offers the geometry menu; during a sketch it offers
/// Cancel and Save.
pub fn toolbar(ctx: &Context, sketching: bool) -> Option<UiAction> {
    let mut action = None;
    TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Map");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if sketching {
                    if ui.button("Save").clicked() {
                        action = Some(UiAction::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(UiAction::Cancel);
                    }
                } else {
                    ui.menu_button("➕", |ui| {
                        if ui.button("Point").clicked() {
                            action = Some(UiAction::StartSketch(CreationMode::Point));
                            ui.close();
                        }
                        if ui.button("Polyline").clicked() {
                            action = Some(UiAction::StartSketch(CreationMode::Polyline));
                            ui.close();
                        }
                        if ui.button("Polygon").clicked() {
                            action = Some(UiAction::StartSketch(CreationMode::Polygon));
                            ui.close();
                        }
                    });
                }
            });
        });
    });
    action
}
