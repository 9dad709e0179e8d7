//! Spherical-geometry backend and coordinate projection.
//!
//! The S2 builder never calls a geometry library directly. It goes through
//! [`SphereBackend`], so tests (and alternative S2 bindings) can substitute
//! their own implementation. [`S2Backend`] is the default, built on the `s2`
//! crate's `LatLng`, `Point` and `CellID`.
//!
//! # Axis order
//!
//! GeoJSON positions are `[longitude, latitude]`. S2 constructs a `LatLng`
//! from `(latitude, longitude)` degrees. [`latlng_of`] is the one place the
//! swap happens: axis 1 becomes the latitude, axis 0 the longitude.

use crate::geometry::Coordinate;
use s2::cellid::CellID;
use s2::latlng::LatLng;
use s2::point::Point;

/// The spherical-geometry capabilities the builder depends on.
///
/// `loop_from_points` and `polygon_from_loops` have preconditions the
/// implementation is not required to check: at least three points per loop,
/// and exactly one loop per polygon. The builder guarantees both.
pub trait SphereBackend {
    type LatLng;
    type Point: Clone;
    type Loop;
    type Polygon;
    type CellId;

    /// Build a latitude/longitude pair from degrees. Latitude comes first.
    fn latlng_from_degrees(&self, lat: f64, lng: f64) -> Self::LatLng;

    fn point_from_latlng(&self, ll: &Self::LatLng) -> Self::Point;

    /// Inverse of [`point_from_latlng`](Self::point_from_latlng).
    fn latlng_from_point(&self, point: &Self::Point) -> Self::LatLng;

    fn loop_from_points(&self, points: Vec<Self::Point>) -> Self::Loop;

    fn polygon_from_loops(&self, loops: Vec<Self::Loop>) -> Self::Polygon;

    /// Leaf cell containing `ll`.
    fn cell_id_from_latlng(&self, ll: &Self::LatLng) -> Self::CellId;
}

/// Map a GeoJSON position to a backend `LatLng` as `(lat = y, lng = x)`.
///
/// No range checks: out-of-range values go to the backend unchanged.
pub fn latlng_of<B: SphereBackend>(backend: &B, coord: &Coordinate) -> B::LatLng {
    backend.latlng_from_degrees(coord.y(), coord.x())
}

/// Project a GeoJSON position onto the unit sphere.
pub fn project<B: SphereBackend>(backend: &B, coord: &Coordinate) -> B::Point {
    backend.point_from_latlng(&latlng_of(backend, coord))
}

/// A closed chain of S2 points. The closing edge is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalLoop {
    vertices: Vec<Point>,
}

impl SphericalLoop {
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, i: usize) -> Option<&Point> {
        self.vertices.get(i)
    }
}

/// An S2 polygon. Only single-loop polygons are constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalPolygon {
    loops: Vec<SphericalLoop>,
}

impl SphericalPolygon {
    pub fn loops(&self) -> &[SphericalLoop] {
        &self.loops
    }

    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }

    /// Total vertices across all loops.
    pub fn num_vertices(&self) -> usize {
        self.loops.iter().map(SphericalLoop::num_vertices).sum()
    }
}

/// Default backend on the `s2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct S2Backend;

impl SphereBackend for S2Backend {
    type LatLng = LatLng;
    type Point = Point;
    type Loop = SphericalLoop;
    type Polygon = SphericalPolygon;
    type CellId = CellID;

    fn latlng_from_degrees(&self, lat: f64, lng: f64) -> LatLng {
        LatLng::from_degrees(lat, lng)
    }

    fn point_from_latlng(&self, ll: &LatLng) -> Point {
        Point::from(ll)
    }

    fn latlng_from_point(&self, point: &Point) -> LatLng {
        LatLng::from(point)
    }

    fn loop_from_points(&self, points: Vec<Point>) -> SphericalLoop {
        SphericalLoop { vertices: points }
    }

    fn polygon_from_loops(&self, loops: Vec<SphericalLoop>) -> SphericalPolygon {
        SphericalPolygon { loops }
    }

    fn cell_id_from_latlng(&self, ll: &LatLng) -> CellID {
        CellID::from(ll)
    }
}
