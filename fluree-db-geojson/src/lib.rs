//! GeoJSON geometry decoding and S2 conversion for Fluree DB.
//!
//! This crate decodes RFC 7946 geometry objects into typed records and turns
//! them into S2 primitives for spatial indexing. It supports:
//!
//! - **Type-sniffed envelopes** that keep the input bytes verbatim
//! - **Strict per-kind decoders** for the seven geometry types
//! - **Recursive GeometryCollection expansion** with a depth limit and
//!   partial results on failure
//! - **S2 points, loops and polygons** through an injectable backend
//!
//! # Architecture
//!
//! ```text
//!                    raw bytes
//!                        │
//!                        ▼
//!            Envelope (type tag + bytes)
//!              │                    │
//!              ▼                    ▼
//!        decode / decode_*       as_map
//!              │               (untyped view)
//!              ▼
//!    Geometry ◄──── GeometryCollection (re-enters decode per member)
//!              │
//!              ▼
//!    SphericalBuilder ──► SphereBackend (S2Backend by default)
//!              │
//!              ▼
//!    S2 points / loops / polygons / cell ids
//! ```
//!
//! # Example
//!
//! ```
//! use fluree_db_geojson::{decode, Envelope, Geometry, SphericalBuilder};
//!
//! let env = Envelope::from_slice(
//!     br#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]}"#,
//! )
//! .unwrap();
//! assert_eq!(env.type_tag(), "Polygon");
//!
//! let Geometry::Polygon(polygon) = decode(&env).unwrap() else {
//!     unreachable!()
//! };
//! let s2_polygon = SphericalBuilder::new().polygon_from(&polygon).unwrap();
//! assert_eq!(s2_polygon.num_vertices(), 4);
//! ```
//!
//! # Modules
//!
//! - [`envelope`]: Type sniffing
//! - [`geometry`]: Geometry kinds and records
//! - [`decode`]: Strict decoders and dispatch
//! - [`collection`]: GeometryCollection expansion
//! - [`sphere`]: S2 backend and coordinate projection
//! - [`builder`]: S2 loop and polygon construction
//! - [`generic`]: Untyped map view
//! - [`config`]: Decode and builder configuration
//! - [`error`]: Error types

pub mod config;
pub mod error;

pub mod builder;
pub mod collection;
pub mod decode;
pub mod envelope;
pub mod generic;
pub mod geometry;
pub mod sphere;

// Re-export key types
pub use builder::SphericalBuilder;
pub use collection::{decode_collection, decode_collection_with};
pub use config::{BuilderConfig, DecodeConfig};
pub use decode::{
    decode, decode_line_string, decode_multi_line_string, decode_multi_point,
    decode_multi_polygon, decode_point, decode_polygon, decode_with, from_slice,
};
pub use envelope::Envelope;
pub use error::{GeoJsonError, Result};
pub use generic::as_map;
pub use geometry::{
    BBox, Coordinate, Geometry, GeometryCollection, GeometryType, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
pub use sphere::{
    latlng_of, project, S2Backend, SphereBackend, SphericalLoop, SphericalPolygon,
};
