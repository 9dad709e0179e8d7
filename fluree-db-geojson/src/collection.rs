//! GeometryCollection expansion.
//!
//! A collection is decoded in two steps: its `geometries` member is read as
//! raw fragments, then each fragment is sniffed and dispatched through the
//! same top-level decode used for standalone geometries. Nested collections
//! re-enter this module one level deeper.
//!
//! Expansion is fail-fast: the first failing member stops it, and the
//! collection decoded so far travels with the error as
//! [`GeoJsonError::PartialCollection`].

use crate::config::DecodeConfig;
use crate::decode::decode_at_depth;
use crate::envelope::Envelope;
use crate::error::{GeoJsonError, Result};
use crate::geometry::{lenient_bbox, GeometryCollection, GeometryType};
use serde::Deserialize;
use serde_json::value::RawValue;
use std::sync::Arc;

#[derive(Deserialize)]
struct RawCollection {
    geometries: Vec<Box<RawValue>>,
    #[serde(default, deserialize_with = "lenient_bbox")]
    bbox: Option<Vec<f64>>,
}

/// Decode a `GeometryCollection` with the default [`DecodeConfig`].
pub fn decode_collection(env: &Envelope) -> Result<GeometryCollection> {
    decode_collection_with(env, &DecodeConfig::default())
}

/// Decode a `GeometryCollection`, expanding every member recursively.
pub fn decode_collection_with(
    env: &Envelope,
    config: &DecodeConfig,
) -> Result<GeometryCollection> {
    expand_collection(env, config, 0)
}

pub(crate) fn expand_collection(
    env: &Envelope,
    config: &DecodeConfig,
    depth: usize,
) -> Result<GeometryCollection> {
    env.expect_type(GeometryType::GeometryCollection)?;

    let parsed: RawCollection = serde_json::from_slice(env.raw())?;
    let raw_children: Vec<Arc<[u8]>> = parsed
        .geometries
        .iter()
        .map(|fragment| Arc::from(fragment.get().as_bytes()))
        .collect();

    let mut collection = GeometryCollection {
        geometries: Vec::with_capacity(raw_children.len()),
        raw_children,
        bbox: parsed.bbox,
    };

    if collection.raw_children.is_empty() {
        return Ok(collection);
    }

    let child_depth = depth + 1;
    if child_depth > config.max_depth {
        tracing::debug!(
            depth = depth,
            max_depth = config.max_depth,
            "GeometryCollection nesting limit reached"
        );
        return Err(GeoJsonError::DepthExceeded {
            max_depth: config.max_depth,
        });
    }

    for index in 0..collection.raw_children.len() {
        let raw = Arc::clone(&collection.raw_children[index]);
        let decoded = Envelope::from_shared(raw)
            .and_then(|child| decode_at_depth(&child, config, child_depth));

        match decoded {
            Ok(geom) => {
                tracing::trace!(
                    index = index,
                    depth = child_depth,
                    geom_type = %geom.geometry_type(),
                    "Decoded collection member"
                );
                collection.geometries.push(geom);
            }
            Err(e) => {
                tracing::debug!(
                    index = index,
                    depth = child_depth,
                    decoded = collection.geometries.len(),
                    error = %e,
                    "Failed to decode collection member"
                );
                return Err(GeoJsonError::PartialCollection {
                    index,
                    partial: Box::new(collection),
                    source: Box::new(e),
                });
            }
        }
    }

    Ok(collection)
}
