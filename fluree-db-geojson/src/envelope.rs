//! Type-sniffed geometry envelope.
//!
//! An [`Envelope`] is the first phase of decoding: only the `type` member is
//! read, and the input bytes are kept verbatim for a later strict decode.

use crate::error::{GeoJsonError, Result};
use crate::geometry::GeometryType;
use serde::Deserialize;
use std::borrow::Cow;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Deserialize)]
struct TypePeek<'a> {
    #[serde(rename = "type", borrow)]
    type_tag: Cow<'a, str>,
}

/// Raw GeoJSON geometry bytes paired with their declared `type`.
///
/// Immutable once built. Clones share the underlying bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    type_tag: String,
    raw: Arc<[u8]>,
}

impl Envelope {
    /// Sniff the `type` member of `bytes`, copying the bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_shared(Arc::from(bytes))
    }

    /// Sniff the `type` member of `bytes`, taking ownership.
    pub fn from_vec(bytes: Vec<u8>) -> Result<Self> {
        Self::from_shared(Arc::from(bytes))
    }

    /// Sniff the `type` member of already shared bytes.
    ///
    /// Fails on malformed JSON, or when `type` is missing or not a string.
    /// Unknown tags are accepted here and rejected at dispatch.
    pub fn from_shared(raw: Arc<[u8]>) -> Result<Self> {
        let peek: TypePeek<'_> = serde_json::from_slice(&raw)?;
        let type_tag = peek.type_tag.into_owned();
        Ok(Self { type_tag, raw })
    }

    /// Declared `type` member.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Input bytes, byte-identical to what the envelope was built from.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Shared handle to the input bytes.
    pub fn raw_shared(&self) -> Arc<[u8]> {
        Arc::clone(&self.raw)
    }

    /// Kind named by the tag, or `None` when it is not a geometry kind.
    pub fn geometry_type(&self) -> Option<GeometryType> {
        GeometryType::from_tag(&self.type_tag)
    }

    /// Fail with `TypeMismatch` unless the tag names `expected`.
    pub(crate) fn expect_type(&self, expected: GeometryType) -> Result<()> {
        if self.type_tag != expected.as_str() {
            return Err(GeoJsonError::TypeMismatch {
                expected: expected.as_str(),
                found: self.type_tag.clone(),
            });
        }
        Ok(())
    }
}

impl FromStr for Envelope {
    type Err = GeoJsonError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}
