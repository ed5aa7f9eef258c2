//! Protocol module containing the JSON envelope types, the segment codec,
//! and the protocol constants.

pub mod codec;
pub mod envelope;

pub use codec::{decode_segments, encode_segments, SegmentCodecError};
pub use envelope::{
    ClientEnvelope, ServerEnvelope, CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_PORT,
    DEVTOOLS_WS_PATH, LOG_QUEUE_CAPACITY,
};
