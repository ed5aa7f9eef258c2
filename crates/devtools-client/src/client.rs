//! The client facade: the only surface an embedding application sees.
//!
//! [`DevtoolsClient`] composes the capture console, the outbound queue, and
//! the session machinery behind four operations: `connect`, `log`,
//! `disconnect`, `is_connected`.
//!
//! The central contract is that [`DevtoolsClient::log`] never blocks and
//! never fails visibly — it is safe to call from latency-sensitive paths.
//! Every failure mode behind it (queue full, encoder error, dead session)
//! degrades to a silent drop, observable only through spillover reports on
//! the server and `tracing` output locally.

use std::fmt::Display;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::error;

use devtools_core::encode_segments;

use crate::config::ClientConfig;
use crate::connection::Session;
use crate::console::CaptureConsole;
use crate::error::ConnectError;
use crate::queue::LogRecord;

/// A devtools client embedded in an application.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use devtools_client::{CaptureConsole, ClientConfig, DevtoolsClient};
///
/// # async fn example() -> anyhow::Result<()> {
/// let console = Arc::new(CaptureConsole::new());
/// let mut client = DevtoolsClient::new(ClientConfig::default(), Arc::clone(&console));
///
/// client.connect().await?;
/// client.log(&[&"ready"], file!(), line!());
/// client.disconnect().await;
/// # Ok(())
/// # }
/// ```
pub struct DevtoolsClient {
    config: ClientConfig,
    console: Arc<CaptureConsole>,
    session: Option<Session>,
}

impl DevtoolsClient {
    /// Creates a disconnected client around an explicitly owned capture
    /// console.
    ///
    /// The console is shared: the embedder keeps its own `Arc` (for example
    /// to observe geometry), the client renders into it, and the listener
    /// task updates its size from `server_info` messages.
    pub fn new(config: ClientConfig, console: Arc<CaptureConsole>) -> Self {
        Self {
            config,
            console,
            session: None,
        }
    }

    /// Connects to the devtools server, spawning the session tasks.
    ///
    /// Suspends the caller until the handshake completes or the configured
    /// timeout elapses. Calling `connect` on an already-connected client is
    /// a no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError`] if the handshake fails for any reason; no
    /// session is left behind and the call may simply be repeated.
    pub async fn connect(&mut self) -> Result<(), ConnectError> {
        if self.session.is_some() {
            return Ok(());
        }
        let session = Session::connect(&self.config, Arc::clone(&self.console)).await?;
        self.session = Some(session);
        Ok(())
    }

    /// Disconnects, draining queued records first.
    ///
    /// Suspends the caller until both session tasks have fully terminated.
    /// Every record enqueued before this call is transmitted before the
    /// socket closes; records logged concurrently with it may be dropped.
    /// A no-op on a disconnected client.
    pub async fn disconnect(&mut self) {
        if let Some(session) = self.session.take() {
            session.shutdown().await;
        }
    }

    /// True iff a session exists and the socket is open from both sides.
    pub fn is_connected(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_open)
    }

    /// Ships a log entry, best effort.
    ///
    /// Renders `objects` through the capture console, extracts and encodes
    /// the resulting segments, stamps the record with the current unix time
    /// and the given call site, and enqueues it without ever suspending.
    /// When the queue is full the record is dropped and counted as
    /// spillover. When disconnected this is a no-op.
    ///
    /// Call sites usually go through [`devlog!`](crate::devlog), which fills
    /// in `path` and `line_number` automatically.
    pub fn log(&self, objects: &[&dyn Display], path: &str, line_number: u32) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        self.console.print(objects);
        let segments = self.console.export_segments();

        let encoded_segments = match encode_segments(&segments) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("dropping log record, segment encoding failed: {e}");
                return;
            }
        };

        session.producer.submit(LogRecord {
            timestamp: unix_timestamp(),
            path: path.to_string(),
            line_number,
            encoded_segments,
        });
    }
}

/// Current unix time in whole seconds.
fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
