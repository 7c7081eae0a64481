//! Geometry model and its GeoJSON text codec.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the geometry codec.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The stored text is not a geometry this crate understands.
    #[error("Invalid geometry JSON: {0}")]
    Decode(serde_json::Error),
    /// The geometry could not be serialized.
    #[error("Geometry serialization failed: {0}")]
    Encode(serde_json::Error),
}

/// A position on the map in geographic coordinates (degrees).
///
/// Serializes as a GeoJSON `[lon, lat]` position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct MapPoint {
    /// Longitude in degrees, positive east.
    pub lon: f64,
    /// Latitude in degrees, positive north.
    pub lat: f64,
}

impl MapPoint {
    /// Create a new position.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for MapPoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<MapPoint> for [f64; 2] {
    fn from(point: MapPoint) -> [f64; 2] {
        [point.lon, point.lat]
    }
}

/// A finalized map geometry.
///
/// The serde representation is a GeoJSON geometry object: the variant name
/// becomes the `type` tag and the payload the `coordinates` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A single position.
    Point(MapPoint),
    /// An open vertex sequence.
    #[serde(rename = "LineString")]
    Polyline(Vec<MapPoint>),
    /// Closed rings; the first ring is the exterior.
    Polygon(Vec<Vec<MapPoint>>),
}

impl Geometry {
    /// A point geometry.
    pub fn point(at: MapPoint) -> Self {
        Geometry::Point(at)
    }

    /// A polyline through the given vertices, in order.
    pub fn polyline(vertices: Vec<MapPoint>) -> Self {
        Geometry::Polyline(vertices)
    }

    /// A polygon whose exterior ring passes through the given vertices.
    ///
    /// The ring is closed by repeating the first vertex at the end when the
    /// input does not already do so. Fewer than three vertices yield a
    /// degenerate but valid area.
    pub fn polygon(vertices: Vec<MapPoint>) -> Self {
        let mut ring = vertices;
        match (ring.first().copied(), ring.last().copied()) {
            (Some(first), Some(last)) if first != last => ring.push(first),
            _ => {}
        }
        Geometry::Polygon(vec![ring])
    }

    /// The vertices of the sketchable outline: the point itself, the
    /// polyline vertices, or the polygon's exterior ring.
    pub fn vertices(&self) -> &[MapPoint] {
        match self {
            Geometry::Point(point) => std::slice::from_ref(point),
            Geometry::Polyline(vertices) => vertices,
            Geometry::Polygon(rings) => rings.first().map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Encode to GeoJSON geometry text.
    pub fn to_json(&self) -> Result<String, GeometryError> {
        serde_json::to_string(self).map_err(GeometryError::Encode)
    }

    /// Decode from GeoJSON geometry text.
    pub fn from_json(text: &str) -> Result<Self, GeometryError> {
        serde_json::from_str(text).map_err(GeometryError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_roundtrip() {
        let geometry = Geometry::point(MapPoint::new(-118.8, 34.0));
        let json = geometry.to_json().unwrap();
        assert_eq!(Geometry::from_json(&json).unwrap(), geometry);
    }

    #[test]
    fn test_polyline_roundtrip() {
        let geometry = Geometry::polyline(vec![
            MapPoint::new(0.0, 0.0),
            MapPoint::new(1.0, 0.5),
            MapPoint::new(2.0, 1.5),
        ]);
        let json = geometry.to_json().unwrap();
        assert_eq!(Geometry::from_json(&json).unwrap(), geometry);
    }

    #[test]
    fn test_polygon_roundtrip() {
        let geometry = Geometry::polygon(vec![
            MapPoint::new(0.0, 0.0),
            MapPoint::new(1.0, 0.0),
            MapPoint::new(1.0, 1.0),
        ]);
        let json = geometry.to_json().unwrap();
        assert_eq!(Geometry::from_json(&json).unwrap(), geometry);
    }

    #[test]
    fn test_geojson_wire_shape() {
        let geometry = Geometry::point(MapPoint::new(-118.8, 34.0));
        let value: serde_json::Value =
            serde_json::from_str(&geometry.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "Point");
        assert_eq!(value["coordinates"][0], -118.8);
        assert_eq!(value["coordinates"][1], 34.0);

        let geometry = Geometry::polyline(vec![MapPoint::new(0.0, 0.0), MapPoint::new(1.0, 1.0)]);
        let value: serde_json::Value =
            serde_json::from_str(&geometry.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "LineString");
    }

    #[test]
    fn test_polygon_closes_exterior_ring() {
        let geometry = Geometry::polygon(vec![
            MapPoint::new(0.0, 0.0),
            MapPoint::new(1.0, 0.0),
            MapPoint::new(1.0, 1.0),
        ]);
        let ring = geometry.vertices();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_polygon_already_closed_ring_untouched() {
        let geometry = Geometry::polygon(vec![
            MapPoint::new(0.0, 0.0),
            MapPoint::new(1.0, 0.0),
            MapPoint::new(1.0, 1.0),
            MapPoint::new(0.0, 0.0),
        ]);
        assert_eq!(geometry.vertices().len(), 4);
    }

    #[test]
    fn test_degenerate_polygon_accepted() {
        let geometry = Geometry::polygon(vec![MapPoint::new(0.0, 0.0)]);
        assert_eq!(geometry.vertices().len(), 1);
        let json = geometry.to_json().unwrap();
        assert_eq!(Geometry::from_json(&json).unwrap(), geometry);
    }

    #[test]
    fn test_decode_failure() {
        assert!(matches!(
            Geometry::from_json("not a geometry"),
            Err(GeometryError::Decode(_))
        ));
        assert!(matches!(
            Geometry::from_json(r#"{"type":"Nonagon","coordinates":[]}"#),
            Err(GeometryError::Decode(_))
        ));
    }
}
