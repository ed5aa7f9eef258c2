//! Codec for the `encoded_segments` field of a `client_log` envelope.
//!
//! Wire format, before base64:
//!
//! ```text
//! [version:1][bincode(Vec<Segment>):N]
//! ```
//!
//! The whole buffer is then base64-encoded (standard alphabet, RFC 4648) so
//! it can travel as a JSON string value. `decode_segments` is the exact
//! inverse of `encode_segments`, including for the empty sequence.
//!
//! The leading version byte pins the binary layout: a server that receives a
//! version it does not understand can reject the payload cleanly instead of
//! misinterpreting bytes.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

use crate::domain::segment::Segment;

/// Current version of the segment encoding. Bump when the binary layout of
/// [`Segment`] changes incompatibly.
pub const SEGMENT_ENCODING_VERSION: u8 = 1;

/// Errors that can occur while encoding or decoding a segment payload.
#[derive(Debug, Error, PartialEq)]
pub enum SegmentCodecError {
    /// The payload is not valid base64.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    /// The decoded payload was empty — even zero segments carry a version byte.
    #[error("encoded payload is empty")]
    Empty,

    /// The version byte does not match a layout this build understands.
    #[error("unsupported segment encoding version: {0}")]
    UnsupportedVersion(u8),

    /// The binary body could not be serialized or deserialized.
    #[error("malformed segment data: {0}")]
    Malformed(String),
}

/// Encodes a sequence of segments into one transport-safe string.
///
/// # Errors
///
/// Returns [`SegmentCodecError::Malformed`] if binary serialization fails.
///
/// # Examples
///
/// ```rust
/// use devtools_core::{decode_segments, encode_segments, Segment};
///
/// let segments = vec![Segment::plain("hello"), Segment::line_break()];
/// let encoded = encode_segments(&segments).unwrap();
/// assert_eq!(decode_segments(&encoded).unwrap(), segments);
/// ```
pub fn encode_segments(segments: &[Segment]) -> Result<String, SegmentCodecError> {
    let body =
        bincode::serialize(segments).map_err(|e| SegmentCodecError::Malformed(e.to_string()))?;

    let mut raw = Vec::with_capacity(1 + body.len());
    raw.push(SEGMENT_ENCODING_VERSION);
    raw.extend_from_slice(&body);

    Ok(BASE64.encode(raw))
}

/// Decodes a string produced by [`encode_segments`] back into segments.
///
/// # Errors
///
/// Returns [`SegmentCodecError`] if the string is not valid base64, is
/// empty, carries an unknown version byte, or its body does not deserialize.
pub fn decode_segments(encoded: &str) -> Result<Vec<Segment>, SegmentCodecError> {
    let raw = BASE64
        .decode(encoded)
        .map_err(|e| SegmentCodecError::InvalidBase64(e.to_string()))?;

    let (&version, body) = raw.split_first().ok_or(SegmentCodecError::Empty)?;
    if version != SEGMENT_ENCODING_VERSION {
        return Err(SegmentCodecError::UnsupportedVersion(version));
    }

    bincode::deserialize(body).map_err(|e| SegmentCodecError::Malformed(e.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
