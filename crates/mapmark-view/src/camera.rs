//! Viewpoint camera: Web Mercator projection and screen mapping.

use kurbo::{Point, Size, Vec2};
use mapmark_core::MapPoint;
use serde::{Deserialize, Serialize};

/// Earth radius of the spherical Web Mercator projection, in meters.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude bound of the Web Mercator plane.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Assumed screen resolution when converting a cartographic scale to
/// pixels.
const SCREEN_DPI: f64 = 96.0;
const METERS_PER_INCH: f64 = 0.0254;

/// Most zoomed-in scale denominator.
pub const MIN_SCALE: f64 = 1_000.0;
/// Most zoomed-out scale denominator.
pub const MAX_SCALE: f64 = 100_000_000.0;

/// The visible extent of the map: a geographic center and a cartographic
/// scale.
///
/// Handles panning and zooming, converting between screen coordinates and
/// map coordinates through the Web Mercator projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewpoint {
    /// Geographic center of the view.
    pub center: MapPoint,
    /// Scale denominator (72_000.0 means 1:72,000).
    pub scale: f64,
}

impl Default for Viewpoint {
    fn default() -> Self {
        // Santa Monica Mountains at 1:72,000.
        Self::new(MapPoint::new(-118.805, 34.027), 72_000.0)
    }
}

impl Viewpoint {
    /// Create a viewpoint centered on `center` at the given scale.
    pub fn new(center: MapPoint, scale: f64) -> Self {
        Self {
            center,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    /// Ground meters covered by one screen pixel at this scale.
    fn meters_per_pixel(&self) -> f64 {
        self.scale * METERS_PER_INCH / SCREEN_DPI
    }

    /// Project a geographic position onto the Web Mercator plane (meters).
    fn project(point: MapPoint) -> Point {
        let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = EARTH_RADIUS_M * point.lon.to_radians();
        let y = EARTH_RADIUS_M
            * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
                .tan()
                .ln();
        Point::new(x, y)
    }

    /// Inverse projection back to geographic coordinates.
    fn unproject(point: Point) -> MapPoint {
        let lon = (point.x / EARTH_RADIUS_M).to_degrees();
        let lat =
            (2.0 * (point.y / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2)
                .to_degrees();
        MapPoint::new(lon, lat)
    }

    /// Convert a map position to screen coordinates within `viewport`.
    pub fn map_to_screen(&self, point: MapPoint, viewport: Size) -> Point {
        let mpp = self.meters_per_pixel();
        let center = Self::project(self.center);
        let projected = Self::project(point);
        Point::new(
            viewport.width / 2.0 + (projected.x - center.x) / mpp,
            // Screen y grows downward, mercator y grows northward.
            viewport.height / 2.0 - (projected.y - center.y) / mpp,
        )
    }

    /// Convert a screen position within `viewport` back to map
    /// coordinates.
    pub fn screen_to_map(&self, point: Point, viewport: Size) -> MapPoint {
        let mpp = self.meters_per_pixel();
        let center = Self::project(self.center);
        Self::unproject(Point::new(
            center.x + (point.x - viewport.width / 2.0) * mpp,
            center.y - (point.y - viewport.height / 2.0) * mpp,
        ))
    }

    /// Pan by a screen-space drag delta; the map content follows the drag.
    pub fn pan_by(&mut self, delta: Vec2) {
        let mpp = self.meters_per_pixel();
        let center = Self::project(self.center);
        self.center = Self::unproject(Point::new(
            center.x - delta.x * mpp,
            center.y + delta.y * mpp,
        ));
    }

    /// Zoom by `factor` (> 1 zooms in), keeping the map position under
    /// `screen_point` fixed. The scale is clamped to
    /// [`MIN_SCALE`]..[`MAX_SCALE`].
    pub fn zoom_about(&mut self, screen_point: Point, factor: f64, viewport: Size) {
        let new_scale = (self.scale / factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let anchor = self.screen_to_map(screen_point, viewport);
        self.scale = new_scale;

        // Drag the anchor back under the cursor.
        let moved = self.map_to_screen(anchor, viewport);
        self.pan_by(Vec2::new(
            screen_point.x - moved.x,
            screen_point.y - moved.y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    #[test]
    fn test_projection_roundtrip() {
        let original = MapPoint::new(-118.805, 34.027);
        let back = Viewpoint::unproject(Viewpoint::project(original));
        assert!((back.lon - original.lon).abs() < 1e-9);
        assert!((back.lat - original.lat).abs() < 1e-9);
    }

    #[test]
    fn test_center_maps_to_viewport_center() {
        let viewpoint = Viewpoint::default();
        let screen = viewpoint.map_to_screen(viewpoint.center, VIEWPORT);
        assert!((screen.x - 400.0).abs() < 1e-9);
        assert!((screen.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_roundtrip() {
        let viewpoint = Viewpoint::default();
        let screen = Point::new(123.0, 456.0);
        let map = viewpoint.screen_to_map(screen, VIEWPORT);
        let back = viewpoint.map_to_screen(map, VIEWPORT);
        assert!((back.x - screen.x).abs() < 1e-6);
        assert!((back.y - screen.y).abs() < 1e-6);
    }

    #[test]
    fn test_north_is_up() {
        let viewpoint = Viewpoint::default();
        let north = MapPoint::new(viewpoint.center.lon, viewpoint.center.lat + 0.01);
        let screen = viewpoint.map_to_screen(north, VIEWPORT);
        assert!(screen.y < 300.0);
    }

    #[test]
    fn test_pan_follows_drag() {
        let mut viewpoint = Viewpoint::default();
        let before = viewpoint.center;
        // Dragging right reveals territory to the west.
        viewpoint.pan_by(Vec2::new(100.0, 0.0));
        assert!(viewpoint.center.lon < before.lon);
        assert!((viewpoint.center.lat - before.lat).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut viewpoint = Viewpoint::default();
        let anchor_screen = Point::new(200.0, 150.0);
        let anchor_map = viewpoint.screen_to_map(anchor_screen, VIEWPORT);

        viewpoint.zoom_about(anchor_screen, 2.0, VIEWPORT);
        assert!((viewpoint.scale - 36_000.0).abs() < 1e-9);

        let moved = viewpoint.map_to_screen(anchor_map, VIEWPORT);
        assert!((moved.x - anchor_screen.x).abs() < 1e-6);
        assert!((moved.y - anchor_screen.y).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_clamps_scale() {
        let mut viewpoint = Viewpoint::default();
        viewpoint.zoom_about(Point::new(400.0, 300.0), 1e9, VIEWPORT);
        assert!((viewpoint.scale - MIN_SCALE).abs() < f64::EPSILON);

        viewpoint.scale = 72_000.0;
        viewpoint.zoom_about(Point::new(400.0, 300.0), 1e-9, VIEWPORT);
        assert!((viewpoint.scale - MAX_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_clamps_scale() {
        let viewpoint = Viewpoint::new(MapPoint::new(0.0, 0.0), 1.0);
        assert!((viewpoint.scale - MIN_SCALE).abs() < f64::EPSILON);
    }
}
