//! The egui map view: basemap background, graticule, overlays and tap
//! gestures.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui};
use kurbo::{Point, Size, Vec2};
use mapmark_core::{Graphic, MapPoint, Overlay, Rgba, Symbol};

use crate::basemap::Basemap;
use crate::camera::Viewpoint;

/// Dash pattern for provisional strokes.
const DASH_LENGTH: f32 = 6.0;
const GAP_LENGTH: f32 = 4.0;

/// Candidate graticule spacings, in degrees.
const GRATICULE_STEPS: [f64; 8] = [30.0, 10.0, 5.0, 1.0, 0.5, 0.1, 0.05, 0.01];

/// Target on-screen spacing between graticule lines, in pixels.
const GRATICULE_SPACING_PX: f64 = 120.0;

/// A single-tap gesture: where it landed on screen and on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    pub screen: Point,
    pub map: MapPoint,
}

/// The interactive map surface.
///
/// Renders the basemap background, a graticule, and the given overlay
/// layers in order (first = bottom), then reports any single tap.
/// Dragging pans the viewpoint and scrolling zooms it about the cursor.
pub struct MapView<'a> {
    basemap: &'a Basemap,
    viewpoint: &'a mut Viewpoint,
    overlays: &'a [&'a Overlay],
}

impl<'a> MapView<'a> {
    pub fn new(
        basemap: &'a Basemap,
        viewpoint: &'a mut Viewpoint,
        overlays: &'a [&'a Overlay],
    ) -> Self {
        Self {
            basemap,
            viewpoint,
            overlays,
        }
    }

    /// Show the map, filling the available space. Returns the tap gesture
    /// of this frame, if any.
    pub fn show(self, ui: &mut Ui) -> Option<Tap> {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return None;
        }
        let viewport = Size::new(rect.width() as f64, rect.height() as f64);

        if response.dragged() {
            let delta = response.drag_delta();
            self.viewpoint
                .pan_by(Vec2::new(delta.x as f64, delta.y as f64));
        }
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 && response.hovered() {
            if let Some(pos) = response.hover_pos() {
                let factor = (scroll as f64 / 200.0).exp();
                self.viewpoint
                    .zoom_about(to_view(pos, rect), factor, viewport);
            }
        }

        painter.rect_filled(rect, 0.0, color32(self.basemap.style.background()));
        paint_graticule(&painter, rect, self.viewpoint, viewport);
        for overlay in self.overlays {
            for graphic in overlay.graphics() {
                paint_graphic(&painter, rect, self.viewpoint, viewport, graphic);
            }
        }
        painter.text(
            rect.right_bottom() - egui::vec2(6.0, 4.0),
            Align2::RIGHT_BOTTOM,
            self.basemap.style.attribution(),
            FontId::proportional(10.0),
            Color32::from_gray(110),
        );

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let screen = to_view(pos, rect);
                let map = self.viewpoint.screen_to_map(screen, viewport);
                return Some(Tap { screen, map });
            }
        }
        None
    }
}

/// Absolute egui position to view-local coordinates.
fn to_view(pos: Pos2, rect: Rect) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}

fn color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn paint_graphic(
    painter: &egui::Painter,
    rect: Rect,
    viewpoint: &Viewpoint,
    viewport: Size,
    graphic: &Graphic,
) {
    let to_screen = |point: &MapPoint| -> Pos2 {
        let screen = viewpoint.map_to_screen(*point, viewport);
        Pos2::new(
            rect.min.x + screen.x as f32,
            rect.min.y + screen.y as f32,
        )
    };
    let points: Vec<Pos2> = graphic.geometry.vertices().iter().map(to_screen).collect();

    match graphic.symbol {
        Symbol::Marker { color, size } => {
            for point in &points {
                painter.circle_filled(*point, size / 2.0, color32(color));
            }
        }
        Symbol::Stroke {
            color,
            width,
            dashed,
        } => {
            let stroke = Stroke::new(width, color32(color));
            match points.len() {
                0 => {}
                // A one-vertex polyline degenerates to a dot.
                1 => {
                    painter.circle_filled(points[0], width.max(1.0), color32(color));
                }
                _ if dashed => {
                    painter.extend(egui::Shape::dashed_line(
                        &points,
                        stroke,
                        DASH_LENGTH,
                        GAP_LENGTH,
                    ));
                }
                _ => {
                    painter.add(egui::Shape::line(points, stroke));
                }
            }
        }
        Symbol::Fill {
            color,
            outline,
            outline_width,
            dashed,
        } => {
            if points.len() >= 3 {
                painter.add(egui::Shape::convex_polygon(
                    points.clone(),
                    color32(color),
                    Stroke::NONE,
                ));
            }
            let stroke = Stroke::new(outline_width, color32(outline));
            match points.len() {
                0 => {}
                1 => {
                    painter.circle_filled(points[0], outline_width.max(1.0), color32(outline));
                }
                _ if dashed => {
                    painter.extend(egui::Shape::dashed_line(
                        &points,
                        stroke,
                        DASH_LENGTH,
                        GAP_LENGTH,
                    ));
                }
                _ => {
                    painter.add(egui::Shape::closed_line(points, stroke));
                }
            }
        }
    }
}

/// Pick the graticule spacing whose on-screen distance lands closest above
/// [`GRATICULE_SPACING_PX`].
fn graticule_step(degrees_per_pixel: f64) -> f64 {
    let target = degrees_per_pixel * GRATICULE_SPACING_PX;
    GRATICULE_STEPS
        .iter()
        .copied()
        .filter(|step| *step >= target)
        .last()
        .unwrap_or(GRATICULE_STEPS[0])
}

fn paint_graticule(painter: &egui::Painter, rect: Rect, viewpoint: &Viewpoint, viewport: Size) {
    let top_left = viewpoint.screen_to_map(Point::ZERO, viewport);
    let bottom_right =
        viewpoint.screen_to_map(Point::new(viewport.width, viewport.height), viewport);
    let degrees_per_pixel = (bottom_right.lon - top_left.lon).abs() / viewport.width;
    if degrees_per_pixel <= 0.0 {
        return;
    }
    let step = graticule_step(degrees_per_pixel);
    let stroke = Stroke::new(0.5, Color32::from_rgba_unmultiplied(120, 120, 120, 60));

    let mut lon = (top_left.lon / step).floor() * step;
    while lon <= bottom_right.lon {
        let x = viewpoint
            .map_to_screen(MapPoint::new(lon, top_left.lat), viewport)
            .x;
        let x = rect.min.x + x as f32;
        painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
        lon += step;
    }

    let mut lat = (bottom_right.lat / step).floor() * step;
    while lat <= top_left.lat {
        let y = viewpoint
            .map_to_screen(MapPoint::new(top_left.lon, lat), viewport)
            .y;
        let y = rect.min.y + y as f32;
        painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
        lat += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graticule_step_tracks_zoom() {
        // Roughly the default viewpoint: ~0.0002 degrees per pixel.
        assert_eq!(graticule_step(0.0002), 0.05);
        // Zoomed far out a whole-degree grid (or coarser) is picked.
        assert!(graticule_step(0.05) >= 5.0);
        // Zoomed in past the finest step the ladder bottoms out.
        assert_eq!(graticule_step(1e-9), 0.01);
        // Absurdly far out it tops out at the coarsest step.
        assert_eq!(graticule_step(10.0), 30.0);
    }

    #[test]
    fn test_color_conversion_keeps_channels() {
        let converted = color32(Rgba::opaque(10, 20, 30));
        assert_eq!(converted.r(), 10);
        assert_eq!(converted.g(), 20);
        assert_eq!(converted.b(), 30);
        assert_eq!(converted.a(), 255);
        // Alpha survives the premultiplied representation.
        assert_eq!(color32(Rgba::new(0, 0, 0, 40)).a(), 40);
    }

    #[test]
    fn test_to_view_is_rect_relative() {
        let rect = Rect::from_min_max(Pos2::new(10.0, 20.0), Pos2::new(110.0, 120.0));
        let view = to_view(Pos2::new(15.0, 30.0), rect);
        assert!((view.x - 5.0).abs() < 1e-9);
        assert!((view.y - 10.0).abs() < 1e-9);
    }
}
