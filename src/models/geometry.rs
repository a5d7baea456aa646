//! Geometry domain types and GeoJSON interchange representation.
//!
//! A [`Geometry`] is a single user-defined region: drawn as a rectangle or
//! polygon, or carried over verbatim from an imported feature file. Once
//! created it is immutable; the region store replaces or removes geometries
//! only as whole units.
//!
//! The interchange types ([`Feature`], [`FeatureCollection`]) follow the
//! GeoJSON shape the analysis service consumes: coordinates in
//! `[longitude, latitude]` order, polygon rings explicitly closed. Unknown
//! keys in imported documents are ignored.

use serde::{Deserialize, Serialize};

/// A coordinate pair in map order (latitude first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned lat/lng bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Bounding box of a non-empty point sequence.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            south_west: *first,
            north_east: *first,
        };
        for p in &points[1..] {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    /// Grow the box to include a point.
    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    /// Smallest box covering both boxes.
    pub fn merge(mut self, other: Bounds) -> Bounds {
        self.extend(other.south_west);
        self.extend(other.north_east);
        self
    }
}

/// Structural validation failures for geometry constructors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeometryError {
    #[error("Polygon needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),
    #[error("Feature has no polygonal geometry")]
    NotPolygonal,
}

/// GeoJSON geometry value, restricted to the polygonal types the analysis
/// service accepts. Coordinates are `[lng, lat]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

impl GeoJsonGeometry {
    /// Every vertex of every ring, in document order.
    pub fn points(&self) -> Vec<LatLng> {
        let mut out = Vec::new();
        match self {
            GeoJsonGeometry::Polygon { coordinates } => {
                for ring in coordinates {
                    out.extend(ring.iter().map(|c| LatLng::new(c[1], c[0])));
                }
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    for ring in polygon {
                        out.extend(ring.iter().map(|c| LatLng::new(c[1], c[0])));
                    }
                }
            }
        }
        out
    }
}

/// A single GeoJSON feature. Properties are carried opaquely so that an
/// imported feature round-trips losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: GeoJsonGeometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
}

/// The FeatureCollection document submitted to the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// A single drawn or imported spatial region.
///
/// Immutable once constructed. `Rectangle` and `Polygon` come from the draw
/// tool; `Imported` wraps a feature parsed from an uploaded file unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Rectangle {
        south_west: LatLng,
        north_east: LatLng,
    },
    Polygon {
        exterior: Vec<LatLng>,
    },
    Imported(Feature),
}

impl Geometry {
    /// Rectangle from two opposite corners, as emitted by the draw tool.
    pub fn rectangle(south_west: LatLng, north_east: LatLng) -> Self {
        Self::Rectangle {
            south_west,
            north_east,
        }
    }

    /// Polygon from an ordered vertex sequence.
    ///
    /// Accepts both open rings and explicitly closed rings (first == last).
    /// Requires at least 3 distinct vertices; self-intersection is not
    /// checked here (the analysis service validates geometry).
    pub fn polygon(exterior: Vec<LatLng>) -> std::result::Result<Self, GeometryError> {
        let distinct = distinct_ring_len(&exterior);
        if distinct < 3 {
            return Err(GeometryError::TooFewVertices(distinct));
        }
        Ok(Self::Polygon { exterior })
    }

    /// Wrap a parsed feature, verifying it carries a polygonal geometry.
    pub fn imported(feature: Feature) -> std::result::Result<Self, GeometryError> {
        let polygonal = match &feature.geometry {
            GeoJsonGeometry::Polygon { coordinates } => !coordinates.is_empty(),
            GeoJsonGeometry::MultiPolygon { coordinates } => !coordinates.is_empty(),
        };
        if polygonal {
            Ok(Self::Imported(feature))
        } else {
            Err(GeometryError::NotPolygonal)
        }
    }

    /// The GeoJSON feature this geometry serializes to.
    ///
    /// Rectangles and polygons become `Polygon` features with a closed
    /// exterior ring; imported features are returned unchanged so that
    /// coordinate precision and properties survive a round trip.
    pub fn to_feature(&self) -> Feature {
        match self {
            Geometry::Rectangle {
                south_west: sw,
                north_east: ne,
            } => {
                let ring = vec![
                    [sw.lng, sw.lat],
                    [ne.lng, sw.lat],
                    [ne.lng, ne.lat],
                    [sw.lng, ne.lat],
                    [sw.lng, sw.lat],
                ];
                Feature {
                    geometry: GeoJsonGeometry::Polygon {
                        coordinates: vec![ring],
                    },
                    properties: None,
                }
            }
            Geometry::Polygon { exterior } => {
                let mut ring: Vec<[f64; 2]> =
                    exterior.iter().map(|p| [p.lng, p.lat]).collect();
                if ring.first() != ring.last() {
                    if let Some(first) = ring.first().copied() {
                        ring.push(first);
                    }
                }
                Feature {
                    geometry: GeoJsonGeometry::Polygon {
                        coordinates: vec![ring],
                    },
                    properties: None,
                }
            }
            Geometry::Imported(feature) => feature.clone(),
        }
    }

    /// Bounding box of this geometry.
    pub fn bounds(&self) -> Bounds {
        match self {
            Geometry::Rectangle {
                south_west,
                north_east,
            } => Bounds {
                south_west: *south_west,
                north_east: *north_east,
            },
            Geometry::Polygon { exterior } => Bounds::from_points(exterior)
                .unwrap_or(Bounds {
                    south_west: LatLng::new(0.0, 0.0),
                    north_east: LatLng::new(0.0, 0.0),
                }),
            Geometry::Imported(feature) => {
                let points = feature.geometry.points();
                Bounds::from_points(&points).unwrap_or(Bounds {
                    south_west: LatLng::new(0.0, 0.0),
                    north_east: LatLng::new(0.0, 0.0),
                })
            }
        }
    }
}

fn distinct_ring_len(vertices: &[LatLng]) -> usize {
    let open = match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) if vertices.len() > 1 && first == last => {
            &vertices[..vertices.len() - 1]
        }
        _ => vertices,
    };
    let mut distinct: Vec<LatLng> = Vec::with_capacity(open.len());
    for v in open {
        if !distinct.contains(v) {
            distinct.push(*v);
        }
    }
    distinct.len()
}
