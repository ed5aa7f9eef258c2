//! JSON envelope types for the devtools wire protocol.
//!
//! Every message travelling between a client and a devtools server is a JSON
//! object with a `"type"` discriminant and a `"payload"` object:
//!
//! ```json
//! {"type":"client_log","payload":{"timestamp":1700000000,"path":"app.py","line_number":5,"encoded_segments":"…"}}
//! {"type":"client_spillover","payload":{"spillover":42}}
//! {"type":"server_info","payload":{"width":100,"height":40}}
//! ```
//!
//! Serde's `#[serde(tag = "type", content = "payload")]` attribute produces
//! exactly this shape from plain enum variants.
//!
//! # Why separate client→server and server→client enums?
//!
//! The two directions carry different information: the client only ever
//! *sends* log traffic, and the server only ever *sends* geometry updates.
//! Two distinct enums make it a compile-time error to send a server-only
//! message from the client, and vice versa.
//!
//! # Forward compatibility
//!
//! Either side may introduce new `"type"` values. A receiver must ignore
//! envelopes it does not recognise. At this layer that surfaces as a serde
//! deserialization error — the *caller* (the client's listener task) treats
//! any parse failure as "not for me" and carries on.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ── Protocol constants ────────────────────────────────────────────────────────

/// Default devtools server host. The server normally runs next to the
/// application under inspection.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default devtools server port.
pub const DEFAULT_PORT: u16 = 8081;

/// Fixed request path of the devtools WebSocket endpoint.
pub const DEVTOOLS_WS_PATH: &str = "/textual-devtools-websocket";

/// How long a client waits for the WebSocket handshake to complete before
/// giving up on `connect()`.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Capacity of the client's outbound log queue. Fixed for the lifetime of a
/// session; overflow is counted as spillover rather than blocking the caller.
pub const LOG_QUEUE_CAPACITY: usize = 512;

// ── Client → server envelopes ─────────────────────────────────────────────────

/// All messages a client can send to the devtools server.
///
/// # Serde representation
///
/// ```json
/// {"type":"client_log","payload":{"timestamp":1700000000,"path":"app.py","line_number":5,"encoded_segments":"AQ=="}}
/// {"type":"client_spillover","payload":{"spillover":3}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientEnvelope {
    /// One captured log entry.
    ClientLog {
        /// Unix timestamp (whole seconds) at which the log call was made.
        timestamp: u64,
        /// Source file the log call was made from.
        path: String,
        /// Line number the log call was made from.
        line_number: u32,
        /// Captured segments, encoded with
        /// [`crate::protocol::codec::encode_segments`].
        encoded_segments: String,
    },

    /// Report of how many log entries the client discarded because its
    /// outbound queue was full.
    ///
    /// Sent opportunistically after the queue has drained enough to accept
    /// traffic again; the server typically renders it as a gap marker.
    ClientSpillover {
        /// Number of discarded entries since the last report.
        spillover: u64,
    },
}

// ── Server → client envelopes ─────────────────────────────────────────────────

/// All messages the devtools server can send to a client.
///
/// # Serde representation
///
/// ```json
/// {"type":"server_info","payload":{"width":100,"height":40}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEnvelope {
    /// The server's current display geometry.
    ///
    /// Sent once right after the handshake and again whenever the server's
    /// terminal is resized. The client applies it to its capture surface so
    /// output renders at the width the server will display it at.
    ServerInfo {
        /// Server display width in cells.
        width: u16,
        /// Server display height in cells.
        height: u16,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
