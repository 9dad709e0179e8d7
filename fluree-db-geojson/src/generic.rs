//! Untyped view of an envelope.

use crate::envelope::Envelope;
use crate::error::Result;
use serde_json::{Map, Value};

/// Deserialize the whole envelope into a JSON object map.
///
/// Values are returned exactly as written; nothing is cross-checked against
/// the strict decoders.
pub fn as_map(env: &Envelope) -> Result<Map<String, Value>> {
    Ok(serde_json::from_slice(env.raw())?)
}
