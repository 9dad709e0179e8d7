//! Decode and conversion configuration types.

use crate::error::{GeoJsonError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for decoding GeoJSON geometries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Maximum GeometryCollection nesting depth.
    ///
    /// The outermost geometry is depth 0 and each collection adds one level to
    /// its children, so `0` rejects any collection member.
    /// Default: 32
    pub max_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeConfig {
    /// Default collection nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Set the collection nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Configuration for S2 loop and polygon construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Minimum vertices per loop, counted after the closing vertex is dropped.
    /// Cannot go below 3, which is what S2 requires of a loop.
    /// Default: 3
    pub min_loop_vertices: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            min_loop_vertices: Self::MIN_LOOP_VERTICES,
        }
    }
}

impl BuilderConfig {
    /// Smallest loop S2 can represent.
    pub const MIN_LOOP_VERTICES: usize = 3;

    /// Set the minimum loop vertex count.
    pub fn with_min_loop_vertices(mut self, min_loop_vertices: usize) -> Self {
        self.min_loop_vertices = min_loop_vertices;
        self
    }

    /// Reject settings that would let degenerate loops reach the backend.
    pub fn validate(&self) -> Result<()> {
        if self.min_loop_vertices < Self::MIN_LOOP_VERTICES {
            return Err(GeoJsonError::Config(format!(
                "min_loop_vertices must be at least {}, got {}",
                Self::MIN_LOOP_VERTICES,
                self.min_loop_vertices
            )));
        }
        Ok(())
    }
}
