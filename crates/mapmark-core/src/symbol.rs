//! Display symbols for map graphics.

use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::session::CreationMode;

/// An RGBA color independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const RED: Rgba = Rgba::opaque(255, 59, 48);
    pub const BLUE: Rgba = Rgba::opaque(0, 122, 255);
    pub const GREEN: Rgba = Rgba::opaque(52, 199, 89);
    pub const ORANGE: Rgba = Rgba::opaque(255, 149, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// How a graphic is drawn. One variant per geometry family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Symbol {
    /// Circular marker for points.
    Marker { color: Rgba, size: f32 },
    /// Stroked path for polylines.
    Stroke { color: Rgba, width: f32, dashed: bool },
    /// Filled area with outline for polygons.
    Fill {
        color: Rgba,
        outline: Rgba,
        outline_width: f32,
        dashed: bool,
    },
}

impl Symbol {
    /// Symbol for an in-progress sketch in the given mode.
    pub fn preview(mode: CreationMode) -> Self {
        match mode {
            CreationMode::Point => Symbol::Marker {
                color: Rgba::ORANGE,
                size: 10.0,
            },
            CreationMode::Polyline => Symbol::Stroke {
                color: Rgba::RED,
                width: 1.0,
                dashed: true,
            },
            CreationMode::Polygon => Symbol::Fill {
                color: Rgba::RED.with_alpha(128),
                outline: Rgba::RED,
                outline_width: 1.0,
                dashed: true,
            },
        }
    }

    /// Symbol for a finalized or re-displayed geometry, chosen purely by
    /// its type: point marker, line stroke, area fill.
    pub fn finalized(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(_) => Symbol::Marker {
                color: Rgba::RED,
                size: 10.0,
            },
            Geometry::Polyline(_) => Symbol::Stroke {
                color: Rgba::BLUE,
                width: 1.0,
                dashed: false,
            },
            Geometry::Polygon(_) => Symbol::Fill {
                color: Rgba::GREEN.with_alpha(128),
                outline: Rgba::GREEN,
                outline_width: 1.0,
                dashed: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MapPoint;

    #[test]
    fn test_finalized_symbol_follows_geometry_type() {
        let point = Geometry::point(MapPoint::new(0.0, 0.0));
        assert!(matches!(Symbol::finalized(&point), Symbol::Marker { .. }));

        let line = Geometry::polyline(vec![MapPoint::new(0.0, 0.0), MapPoint::new(1.0, 1.0)]);
        assert!(matches!(
            Symbol::finalized(&line),
            Symbol::Stroke { dashed: false, .. }
        ));

        let area = Geometry::polygon(vec![
            MapPoint::new(0.0, 0.0),
            MapPoint::new(1.0, 0.0),
            MapPoint::new(1.0, 1.0),
        ]);
        assert!(matches!(Symbol::finalized(&area), Symbol::Fill { .. }));
    }

    #[test]
    fn test_preview_symbols_are_provisional() {
        assert!(matches!(
            Symbol::preview(CreationMode::Polyline),
            Symbol::Stroke { dashed: true, .. }
        ));
        assert!(matches!(
            Symbol::preview(CreationMode::Polygon),
            Symbol::Fill { dashed: true, .. }
        ));
    }

    #[test]
    fn test_with_alpha() {
        let half = Rgba::RED.with_alpha(128);
        assert_eq!(half.r, Rgba::RED.r);
        assert_eq!(half.a, 128);
    }
}
