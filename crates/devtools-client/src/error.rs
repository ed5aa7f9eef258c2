//! Error types for the client's public surface.
//!
//! Only `connect()` can fail visibly. Everything after a successful
//! handshake degrades silently by contract: `log()` drops records under
//! backpressure, and a mid-session transport failure ends the owning task
//! and flips `is_connected()` to false. A failed `connect()` leaves no
//! session behind — recovery is simply calling `connect()` again.

use std::time::Duration;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Failure to establish a devtools session.
///
/// Both variants mean the same thing to a caller: this attempt failed and
/// was not retried. They are distinguished so log output can tell a silent
/// network from an actively refusing one.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The handshake did not complete within the configured timeout.
    #[error("timed out connecting to devtools server at {url} after {timeout:?}")]
    Timeout {
        /// The WebSocket URL that was dialled.
        url: String,
        /// The configured connect timeout.
        timeout: Duration,
    },

    /// The transport failed: refused connection, failed resolution, or a
    /// rejected WebSocket upgrade.
    #[error("failed to connect to devtools server at {url}: {source}")]
    Transport {
        /// The WebSocket URL that was dialled.
        url: String,
        /// The underlying handshake error.
        #[source]
        source: Box<tungstenite::Error>,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
