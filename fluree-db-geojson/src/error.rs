//! Error types for GeoJSON decoding and S2 conversion.

use crate::geometry::GeometryCollection;
use thiserror::Error;

/// GeoJSON decode and conversion errors.
#[derive(Error, Debug)]
pub enum GeoJsonError {
    /// Malformed JSON, or JSON that does not match the shape expected for the
    /// requested kind (wrong coordinate nesting, missing member, short coordinate).
    #[error("GeoJSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Declared `type` is not one of the seven geometry kinds.
    #[error("Unknown geometry type: '{0}'")]
    UnknownType(String),

    /// Kind-specific decode requested for an envelope of another kind.
    #[error("Can't decode a {expected} from type='{found}'")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// Well-formed input that fails a precondition of spherical construction.
    #[error("Structural error: {0}")]
    Structural(String),

    /// Valid GeoJSON beyond what the spherical layer can build.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Nested GeometryCollections deeper than the configured limit.
    #[error("GeometryCollection nesting exceeds max depth {max_depth}")]
    DepthExceeded { max_depth: usize },

    /// A collection child failed to decode. `partial` holds every raw child and
    /// the children decoded before `index`.
    #[error("GeometryCollection child {index} failed: {source}")]
    PartialCollection {
        index: usize,
        partial: Box<GeometryCollection>,
        #[source]
        source: Box<GeoJsonError>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeoJsonError {
    /// Innermost error, looking through nested partial collections.
    pub fn root_cause(&self) -> &GeoJsonError {
        match self {
            GeoJsonError::PartialCollection { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// True for malformed input, including unknown type tags.
    pub fn is_parse(&self) -> bool {
        matches!(
            self.root_cause(),
            GeoJsonError::Parse(_) | GeoJsonError::UnknownType(_)
        )
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.root_cause(), GeoJsonError::TypeMismatch { .. })
    }

    pub fn is_structural(&self) -> bool {
        matches!(self.root_cause(), GeoJsonError::Structural(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.root_cause(), GeoJsonError::Unsupported(_))
    }

    /// Partially decoded collection carried by a child failure, if any.
    pub fn partial_collection(&self) -> Option<&GeometryCollection> {
        match self {
            GeoJsonError::PartialCollection { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

/// Result type for GeoJSON operations.
pub type Result<T> = std::result::Result<T, GeoJsonError>;
