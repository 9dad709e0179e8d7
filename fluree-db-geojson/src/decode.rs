//! Strict per-kind decoders and top-level dispatch.
//!
//! Each `decode_*` function checks the envelope's tag against its kind and
//! then deserializes the raw bytes into the kind's record. The coordinate
//! nesting depth is enforced by the record shape:
//!
//! | Kind                          | Nesting |
//! |-------------------------------|---------|
//! | Point                         | 0       |
//! | LineString, MultiPoint        | 1       |
//! | Polygon, MultiLineString      | 2       |
//! | MultiPolygon                  | 3       |
//!
//! Nothing beyond shape is checked here. Point counts and ring structure are
//! the concern of the S2 builder.

use crate::collection::expand_collection;
use crate::config::DecodeConfig;
use crate::envelope::Envelope;
use crate::error::{GeoJsonError, Result};
use crate::geometry::{
    Geometry, GeometryType, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use serde::de::DeserializeOwned;

fn decode_as<T: DeserializeOwned>(env: &Envelope, kind: GeometryType) -> Result<T> {
    env.expect_type(kind)?;
    Ok(serde_json::from_slice(env.raw())?)
}

/// Decode a `Point`.
pub fn decode_point(env: &Envelope) -> Result<Point> {
    decode_as(env, GeometryType::Point)
}

/// Decode a `LineString`.
pub fn decode_line_string(env: &Envelope) -> Result<LineString> {
    decode_as(env, GeometryType::LineString)
}

/// Decode a `Polygon`.
pub fn decode_polygon(env: &Envelope) -> Result<Polygon> {
    decode_as(env, GeometryType::Polygon)
}

/// Decode a `MultiPoint`.
pub fn decode_multi_point(env: &Envelope) -> Result<MultiPoint> {
    decode_as(env, GeometryType::MultiPoint)
}

/// Decode a `MultiLineString`.
pub fn decode_multi_line_string(env: &Envelope) -> Result<MultiLineString> {
    decode_as(env, GeometryType::MultiLineString)
}

/// Decode a `MultiPolygon`.
pub fn decode_multi_polygon(env: &Envelope) -> Result<MultiPolygon> {
    decode_as(env, GeometryType::MultiPolygon)
}

/// Decode any geometry by its sniffed type, with the default [`DecodeConfig`].
pub fn decode(env: &Envelope) -> Result<Geometry> {
    decode_with(env, &DecodeConfig::default())
}

/// Decode any geometry by its sniffed type.
///
/// GeometryCollections expand eagerly; a failing member is reported as
/// [`GeoJsonError::PartialCollection`].
pub fn decode_with(env: &Envelope, config: &DecodeConfig) -> Result<Geometry> {
    decode_at_depth(env, config, 0)
}

/// Sniff and decode raw bytes in one step.
pub fn from_slice(bytes: &[u8]) -> Result<Geometry> {
    decode(&Envelope::from_slice(bytes)?)
}

pub(crate) fn decode_at_depth(
    env: &Envelope,
    config: &DecodeConfig,
    depth: usize,
) -> Result<Geometry> {
    let kind = env
        .geometry_type()
        .ok_or_else(|| GeoJsonError::UnknownType(env.type_tag().to_string()))?;

    let geom = match kind {
        GeometryType::Point => Geometry::Point(decode_point(env)?),
        GeometryType::LineString => Geometry::LineString(decode_line_string(env)?),
        GeometryType::Polygon => Geometry::Polygon(decode_polygon(env)?),
        GeometryType::MultiPoint => Geometry::MultiPoint(decode_multi_point(env)?),
        GeometryType::MultiLineString => {
            Geometry::MultiLineString(decode_multi_line_string(env)?)
        }
        GeometryType::MultiPolygon => Geometry::MultiPolygon(decode_multi_polygon(env)?),
        GeometryType::GeometryCollection => {
            Geometry::GeometryCollection(expand_collection(env, config, depth)?)
        }
    };
    Ok(geom)
}
