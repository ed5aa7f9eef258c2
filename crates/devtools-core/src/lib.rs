//! # devtools-core
//!
//! Shared library for term-devtools containing the JSON wire protocol types,
//! the segment codec, and the protocol constants.
//!
//! This crate is used by the client library and by anything that needs to
//! speak the devtools protocol (for example a test harness standing in for
//! the server). It has zero dependencies on sockets, async runtimes, or UI
//! frameworks.
//!
//! # Protocol overview
//!
//! A devtools client ships diagnostic output from a running terminal
//! application to an inspection server over a persistent WebSocket. Every
//! message on the wire is a JSON envelope:
//!
//! ```json
//! {"type": "<message type>", "payload": { ... }}
//! ```
//!
//! This crate defines:
//!
//! - **`protocol::envelope`** – The typed envelopes for both directions
//!   (`client_log` / `client_spillover` going up, `server_info` coming down)
//!   plus the protocol constants (default port, WebSocket path, connect
//!   timeout, queue capacity).
//!
//! - **`protocol::codec`** – How captured render segments travel inside a
//!   `client_log` envelope: a versioned binary serialization wrapped in
//!   base64 so it embeds safely in a JSON string value.
//!
//! - **`domain`** – Pure data types with no wire-format knowledge: the
//!   [`Segment`] and [`SegmentStyle`] structs produced by a capture surface.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `devtools_core::Segment` instead of `devtools_core::domain::segment::Segment`.
pub use domain::segment::{Segment, SegmentStyle};
pub use protocol::codec::{decode_segments, encode_segments, SegmentCodecError};
pub use protocol::envelope::{ClientEnvelope, ServerEnvelope};
