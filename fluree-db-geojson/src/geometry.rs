//! Decoded GeoJSON geometry records.
//!
//! This module provides:
//! - The closed set of geometry kinds ([`GeometryType`])
//! - Strict per-kind records, deserialized from an envelope's raw bytes
//! - The polymorphic [`Geometry`] sum type produced by top-level decoding
//! - Bounding boxes and conversion to `geo-types` for planar predicates
//!
//! # Coordinates
//!
//! Positions follow RFC 7946 axis order: `[longitude, latitude]` with an
//! optional altitude. The altitude is kept but never interpreted here.

use geo::BoundingRect;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

/// Geometry type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GeometryType {
    Point = 0,
    LineString = 1,
    Polygon = 2,
    MultiPoint = 3,
    MultiLineString = 4,
    MultiPolygon = 5,
    GeometryCollection = 6,
}

impl GeometryType {
    /// All kinds, in discriminant order.
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    /// The `type` member value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Match a `type` member value. Exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Check if this is a point type.
    pub fn is_point(&self) -> bool {
        matches!(self, GeometryType::Point | GeometryType::MultiPoint)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, GeometryType::GeometryCollection)
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single position: `[x, y]` or `[x, y, z]`, at least two numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Coordinate(Vec<f64>);

impl Coordinate {
    /// Create a two-dimensional position.
    pub fn new(x: f64, y: f64) -> Self {
        Self(vec![x, y])
    }

    /// Longitude axis.
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    /// Latitude axis.
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// Altitude, if present.
    pub fn z(&self) -> Option<f64> {
        self.0.get(2).copied()
    }

    /// Same longitude and latitude, whatever the altitudes.
    pub fn same_position(&self, other: &Coordinate) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    fn to_geo(&self) -> geo_types::Coord<f64> {
        geo_types::coord! { x: self.x(), y: self.y() }
    }
}

impl TryFrom<Vec<f64>> for Coordinate {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if values.len() < 2 {
            return Err(format!(
                "a position needs at least 2 numbers, got {}",
                values.len()
            ));
        }
        Ok(Self(values))
    }
}

/// Read an optional `bbox` member, treating a malformed one as absent.
///
/// `bbox` is advisory; a bad one must not fail an otherwise valid geometry.
pub(crate) fn lenient_bbox<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `Point` record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Point {
    pub coordinates: Coordinate,
    #[serde(default, deserialize_with = "lenient_bbox")]
    pub bbox: Option<Vec<f64>>,
}

/// `LineString` record. Coordinates are in path order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineString {
    pub coordinates: Vec<Coordinate>,
    #[serde(default, deserialize_with = "lenient_bbox")]
    pub bbox: Option<Vec<f64>>,
}

/// `Polygon` record. Ring 0 is the exterior, the rest are holes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Polygon {
    pub coordinates: Vec<Vec<Coordinate>>,
    #[serde(default, deserialize_with = "lenient_bbox")]
    pub bbox: Option<Vec<f64>>,
}

impl Polygon {
    pub fn exterior(&self) -> Option<&[Coordinate]> {
        self.coordinates.first().map(Vec::as_slice)
    }

    pub fn holes(&self) -> &[Vec<Coordinate>] {
        self.coordinates.get(1..).unwrap_or(&[])
    }
}

/// `MultiPoint` record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MultiPoint {
    pub coordinates: Vec<Coordinate>,
    #[serde(default, deserialize_with = "lenient_bbox")]
    pub bbox: Option<Vec<f64>>,
}

/// `MultiLineString` record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MultiLineString {
    pub coordinates: Vec<Vec<Coordinate>>,
    #[serde(default, deserialize_with = "lenient_bbox")]
    pub bbox: Option<Vec<f64>>,
}

/// `MultiPolygon` record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MultiPolygon {
    pub coordinates: Vec<Vec<Vec<Coordinate>>>,
    #[serde(default, deserialize_with = "lenient_bbox")]
    pub bbox: Option<Vec<f64>>,
}

/// `GeometryCollection` record.
///
/// `raw_children` holds every member exactly as it appeared in the input.
/// `geometries` holds the decoded members in the same order; it is shorter
/// than `raw_children` only when expansion stopped on a failing child.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryCollection {
    pub raw_children: Vec<Arc<[u8]>>,
    pub geometries: Vec<Geometry>,
    pub bbox: Option<Vec<f64>>,
}

impl GeometryCollection {
    /// True when every raw child decoded.
    pub fn is_complete(&self) -> bool {
        self.geometries.len() == self.raw_children.len()
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.geometries.iter()
    }
}

/// A decoded geometry of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Classify this geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// The `bbox` member as declared in the input (not computed).
    pub fn declared_bbox(&self) -> Option<&[f64]> {
        match self {
            Geometry::Point(g) => g.bbox.as_deref(),
            Geometry::LineString(g) => g.bbox.as_deref(),
            Geometry::Polygon(g) => g.bbox.as_deref(),
            Geometry::MultiPoint(g) => g.bbox.as_deref(),
            Geometry::MultiLineString(g) => g.bbox.as_deref(),
            Geometry::MultiPolygon(g) => g.bbox.as_deref(),
            Geometry::GeometryCollection(g) => g.bbox.as_deref(),
        }
    }

    /// Bounding box computed from the coordinates. `None` for empty geometries.
    pub fn bounds(&self) -> Option<BBox> {
        BBox::from_geometry(self)
    }

    /// Convert to a planar `geo-types` geometry (x = longitude, y = latitude).
    ///
    /// Altitudes are dropped. A polygon with no rings becomes an empty polygon.
    pub fn to_geo(&self) -> geo_types::Geometry<f64> {
        match self {
            Geometry::Point(p) => geo_types::Point::from(p.coordinates.to_geo()).into(),
            Geometry::LineString(ls) => line_to_geo(&ls.coordinates).into(),
            Geometry::Polygon(pg) => rings_to_geo(&pg.coordinates).into(),
            Geometry::MultiPoint(mp) => geo_types::MultiPoint::new(
                mp.coordinates
                    .iter()
                    .map(|c| geo_types::Point::from(c.to_geo()))
                    .collect(),
            )
            .into(),
            Geometry::MultiLineString(mls) => geo_types::MultiLineString::new(
                mls.coordinates.iter().map(|l| line_to_geo(l)).collect(),
            )
            .into(),
            Geometry::MultiPolygon(mpg) => geo_types::MultiPolygon::new(
                mpg.coordinates.iter().map(|p| rings_to_geo(p)).collect(),
            )
            .into(),
            Geometry::GeometryCollection(gc) => {
                geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection::from(
                    gc.geometries
                        .iter()
                        .map(Geometry::to_geo)
                        .collect::<Vec<_>>(),
                ))
            }
        }
    }
}

fn line_to_geo(coords: &[Coordinate]) -> geo_types::LineString<f64> {
    geo_types::LineString::new(coords.iter().map(Coordinate::to_geo).collect())
}

fn rings_to_geo(rings: &[Vec<Coordinate>]) -> geo_types::Polygon<f64> {
    let mut rings = rings.iter().map(|r| line_to_geo(r));
    let exterior = rings
        .next()
        .unwrap_or_else(|| geo_types::LineString::new(Vec::new()));
    geo_types::Polygon::new(exterior, rings.collect())
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
            && self.min_lng <= other.max_lng
            && self.max_lng >= other.min_lng
    }

    /// Check if this bbox contains a point.
    pub fn contains_point(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }

    /// Compute from a decoded geometry.
    pub fn from_geometry(geom: &Geometry) -> Option<Self> {
        let rect = geom.to_geo().bounding_rect()?;
        Some(Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        })
    }
}
