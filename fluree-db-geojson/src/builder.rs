//! S2 construction from decoded geometries.
//!
//! The builder turns decoded records into S2 primitives:
//! 1. Projects each position through [`project`] (GeoJSON `[lng, lat]` order)
//! 2. Drops a ring's closing position when it repeats the first one
//! 3. Rejects rings with fewer than `min_loop_vertices` vertices
//! 4. Refuses polygons with holes, which S2 polygon construction cannot take
//!
//! Steps 3 and 4 guard preconditions of the backend, which is never called
//! with inputs it cannot handle.
//!
//! # Usage
//!
//! ```ignore
//! let builder = SphericalBuilder::new();
//! let env = Envelope::from_slice(br#"{"type": "LineString", "coordinates": [[102, 0], [103, 1]]}"#)?;
//! let points = builder.points_of(&env)?;
//! ```

use crate::config::BuilderConfig;
use crate::decode::{
    decode_line_string, decode_multi_line_string, decode_multi_point, decode_multi_polygon,
    decode_point, decode_polygon,
};
use crate::envelope::Envelope;
use crate::error::{GeoJsonError, Result};
use crate::geometry::{Coordinate, GeometryType, MultiLineString, MultiPolygon, Polygon};
use crate::sphere::{latlng_of, project, S2Backend, SphereBackend};

/// Builds S2 points, loops and polygons through a [`SphereBackend`].
#[derive(Debug, Clone)]
pub struct SphericalBuilder<B: SphereBackend = S2Backend> {
    backend: B,
    config: BuilderConfig,
}

impl SphericalBuilder<S2Backend> {
    /// Builder on the default S2 backend.
    pub fn new() -> Self {
        Self {
            backend: S2Backend,
            config: BuilderConfig::default(),
        }
    }
}

impl Default for SphericalBuilder<S2Backend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SphereBackend> SphericalBuilder<B> {
    /// Builder on a custom backend with default configuration.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            config: BuilderConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: BuilderConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Project a single position.
    pub fn project(&self, coord: &Coordinate) -> B::Point {
        project(&self.backend, coord)
    }

    /// Leaf cell for a position, using the same axis order as [`project`](Self::project).
    pub fn cell_id_of(&self, coord: &Coordinate) -> B::CellId {
        self.backend
            .cell_id_from_latlng(&latlng_of(&self.backend, coord))
    }

    /// Project positions in order. No deduplication.
    pub fn points_from(&self, coords: &[Coordinate]) -> Vec<B::Point> {
        coords.iter().map(|c| self.project(c)).collect()
    }

    /// Build a loop from a ring.
    ///
    /// A final position at the same longitude/latitude as the first is
    /// dropped, since S2 loops close implicitly; a closed five-position ring
    /// yields four vertices. Altitudes play no part in the comparison.
    pub fn loop_from(&self, ring: &[Coordinate]) -> Result<B::Loop> {
        let open = match ring {
            [first, .., last] if first.same_position(last) => &ring[..ring.len() - 1],
            _ => ring,
        };

        if open.len() < self.config.min_loop_vertices {
            tracing::debug!(
                positions = ring.len(),
                vertices = open.len(),
                min_vertices = self.config.min_loop_vertices,
                "Ring too short for an S2 loop"
            );
            return Err(GeoJsonError::Structural(format!(
                "a loop needs at least {} vertices, got {}",
                self.config.min_loop_vertices,
                open.len()
            )));
        }

        Ok(self.backend.loop_from_points(self.points_from(open)))
    }

    /// Build a polygon from a single-ring `Polygon`.
    ///
    /// Every ring is checked with [`loop_from`](Self::loop_from) first, so a
    /// degenerate hole is reported as structural even when the polygon would
    /// be rejected for having holes.
    pub fn polygon_from(&self, polygon: &Polygon) -> Result<B::Polygon> {
        self.polygon_from_rings(&polygon.coordinates)
    }

    fn polygon_from_rings(&self, rings: &[Vec<Coordinate>]) -> Result<B::Polygon> {
        if rings.is_empty() {
            return Err(GeoJsonError::Structural("polygon has no rings".into()));
        }

        let loops = rings
            .iter()
            .map(|ring| self.loop_from(ring))
            .collect::<Result<Vec<_>>>()?;

        if loops.len() > 1 {
            tracing::debug!(
                rings = loops.len(),
                "Refusing multi-loop polygon; only single-loop polygons are supported"
            );
            return Err(GeoJsonError::Unsupported(format!(
                "polygon with {} rings: S2 polygon construction supports exactly one loop",
                loops.len()
            )));
        }

        Ok(self.backend.polygon_from_loops(loops))
    }

    /// Project each line of a `MultiLineString`.
    pub fn multi_line_string_points(&self, mls: &MultiLineString) -> Vec<Vec<B::Point>> {
        mls.coordinates
            .iter()
            .map(|line| self.points_from(line))
            .collect()
    }

    /// Build one polygon per member. Stops on the first failing member.
    pub fn multi_polygon_polygons(&self, mpg: &MultiPolygon) -> Result<Vec<B::Polygon>> {
        mpg.coordinates
            .iter()
            .enumerate()
            .map(|(i, rings)| {
                self.polygon_from_rings(rings).inspect_err(|e| {
                    tracing::trace!(member = i, error = %e, "MultiPolygon member rejected");
                })
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Envelope entry points
    // ------------------------------------------------------------------------

    /// S2 point for a `Point` envelope.
    pub fn point_of(&self, env: &Envelope) -> Result<B::Point> {
        let point = decode_point(env)?;
        Ok(self.project(&point.coordinates))
    }

    /// S2 points for a `LineString` or `MultiPoint` envelope.
    pub fn points_of(&self, env: &Envelope) -> Result<Vec<B::Point>> {
        match env.geometry_type() {
            Some(GeometryType::LineString) => {
                Ok(self.points_from(&decode_line_string(env)?.coordinates))
            }
            Some(GeometryType::MultiPoint) => {
                Ok(self.points_from(&decode_multi_point(env)?.coordinates))
            }
            _ => Err(GeoJsonError::TypeMismatch {
                expected: "LineString or MultiPoint",
                found: env.type_tag().to_string(),
            }),
        }
    }

    /// S2 polygon for a `Polygon` envelope.
    pub fn polygon_of(&self, env: &Envelope) -> Result<B::Polygon> {
        self.polygon_from(&decode_polygon(env)?)
    }

    /// Per-line S2 points for a `MultiLineString` envelope.
    pub fn line_sets_of(&self, env: &Envelope) -> Result<Vec<Vec<B::Point>>> {
        Ok(self.multi_line_string_points(&decode_multi_line_string(env)?))
    }

    /// S2 polygons for a `MultiPolygon` envelope.
    pub fn polygons_of(&self, env: &Envelope) -> Result<Vec<B::Polygon>> {
        self.multi_polygon_polygons(&decode_multi_polygon(env)?)
    }
}
