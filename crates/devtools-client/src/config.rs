//! Client configuration types.
//!
//! [`ClientConfig`] is the single source of truth for all connection
//! settings. It can be constructed from CLI arguments (the shipped binary
//! does this) or from the protocol defaults, which is what an embedding
//! application usually wants.
//!
//! Configuration stays a plain struct with no environment reads of its own;
//! whoever owns the process decides where values come from.

use std::time::Duration;

use devtools_core::protocol::{
    CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_PORT, DEVTOOLS_WS_PATH, LOG_QUEUE_CAPACITY,
};

/// All runtime configuration for a devtools client.
///
/// # Example
///
/// ```rust
/// use devtools_client::ClientConfig;
///
/// // Defaults match a devtools server running next to the application:
/// let config = ClientConfig::default();
/// assert_eq!(config.port, 8081);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hostname or IP address of the devtools server.
    pub host: String,

    /// Port of the devtools server.
    pub port: u16,

    /// Maximum time to wait for the WebSocket handshake during `connect()`.
    ///
    /// Only the handshake is time-bounded; an established session has no
    /// internal timeouts.
    pub connect_timeout: Duration,

    /// Capacity of the outbound log queue, fixed for the session's lifetime.
    ///
    /// When the queue is full, further log records are dropped and counted
    /// as spillover instead of blocking the caller.
    pub queue_capacity: usize,
}

impl ClientConfig {
    /// Returns the full WebSocket URL for this configuration.
    pub fn url(&self) -> String {
        format!("ws://{}:{}{}", self.host, self.port, DEVTOOLS_WS_PATH)
    }
}

impl Default for ClientConfig {
    /// Returns a configuration for a devtools server running next to the
    /// application with stock settings.
    ///
    /// | Field           | Default     |
    /// |-----------------|-------------|
    /// | host            | `127.0.0.1` |
    /// | port            | `8081`      |
    /// | connect_timeout | 3 seconds   |
    /// | queue_capacity  | 512         |
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: CONNECT_TIMEOUT,
            queue_capacity: LOG_QUEUE_CAPACITY,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
