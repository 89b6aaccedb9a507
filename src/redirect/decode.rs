//! Source decoding module
//!
//! Parsers turning a raw source payload into an ordered sequence of
//! redirect entries. Both decoders run in two phases so that syntax and
//! schema failures stay distinguishable: the payload is first parsed into
//! the format's generic value type, then the records are deserialized out
//! of that value. Either the full sequence is returned or an error is;
//! nothing partial escapes.

use thiserror::Error;

use super::map::PathEntry;

/// Decoding failure for a redirect source payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not well-formed in the source syntax.
    #[error("malformed source payload: {0}")]
    Malformed(String),
    /// The payload parsed but is not a sequence of `{path, url}` records
    /// with scalar string fields.
    #[error("source payload does not match the redirect schema: {0}")]
    SchemaMismatch(String),
}

/// Decode a YAML sequence of `{path, url}` records.
///
/// Expected shape:
///
/// ```yaml
/// - path: /some-path
///   url: https://www.some-url.com/demo
/// ```
///
/// Input order is preserved. An empty document decodes to an empty
/// sequence.
pub fn decode_yaml(payload: &[u8]) -> Result<Vec<PathEntry>, DecodeError> {
    let doc: serde_yaml::Value =
        serde_yaml::from_slice(payload).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    if doc.is_null() {
        // Empty document: nothing to map.
        return Ok(Vec::new());
    }
    serde_yaml::from_value(doc).map_err(|e| DecodeError::SchemaMismatch(e.to_string()))
}

/// Decode a JSON array of `{path, url}` objects. Input order is preserved.
pub fn decode_json(payload: &[u8]) -> Result<Vec<PathEntry>, DecodeError> {
    let doc: serde_json::Value =
        serde_json::from_slice(payload).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    serde_json::from_value(doc).map_err(|e| DecodeError::SchemaMismatch(e.to_string()))
}
