//! Session lifecycle: handshake, the two per-session tasks, and orderly
//! shutdown.
//!
//! An open [`Session`] owns exactly two spawned tasks:
//!
//! - **Sender** – drains the outbound queue and writes envelope frames to
//!   the socket. Exits on the shutdown sentinel or on a write failure.
//! - **Listener** – reads inbound frames and applies `server_info` geometry
//!   updates to the capture console. Exits when the socket closes.
//!
//! The socket's write half is owned by the sender task alone, so the sender
//! also initiates the WebSocket close handshake as its final act — on the
//! sentinel and on write failure alike. That closure is what unblocks the
//! listener, which keeps shutdown a strict two-phase sequence with no shared
//! sink lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use devtools_core::{ClientEnvelope, ServerEnvelope};

use crate::config::ClientConfig;
use crate::console::CaptureConsole;
use crate::error::ConnectError;
use crate::queue::{log_channel, LogProducer, LogReceiver, LogSender, QueueItem};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// One logical connection to a devtools server and its owned resources.
///
/// Created by [`Session::connect`], consumed by [`Session::shutdown`].
/// Exclusively owned by the client facade.
pub struct Session {
    id: Uuid,
    /// Producer side of the outbound queue, with spillover accounting.
    pub producer: LogProducer,
    /// Extra sender handle kept for the shutdown sentinel.
    sender: LogSender,
    sender_task: JoinHandle<()>,
    listener_task: JoinHandle<()>,
    /// Cleared by the listener when the socket closes from either side.
    open: Arc<AtomicBool>,
}

impl Session {
    /// Opens a session: WebSocket handshake, queue construction, task spawn.
    ///
    /// Only the handshake is time-bounded (`config.connect_timeout`). On any
    /// failure — timeout, refused connection, failed resolution, rejected
    /// upgrade — no session is left behind and the caller may simply try
    /// again.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError`] if the handshake does not complete.
    pub async fn connect(
        config: &ClientConfig,
        console: Arc<CaptureConsole>,
    ) -> Result<Self, ConnectError> {
        let url = config.url();

        let (socket, _response) =
            match timeout(config.connect_timeout, connect_async(url.as_str())).await {
                Ok(Ok(pair)) => pair,
                Ok(Err(source)) => {
                    return Err(ConnectError::Transport {
                        url,
                        source: Box::new(source),
                    })
                }
                Err(_elapsed) => {
                    return Err(ConnectError::Timeout {
                        url,
                        timeout: config.connect_timeout,
                    })
                }
            };

        let id = Uuid::new_v4();
        info!("session {id}: connected to devtools server at {url}");

        // Split into independently owned halves so each task can run without
        // shared ownership of the socket.
        let (sink, stream) = socket.split();
        let (sender, receiver) = log_channel(config.queue_capacity);
        let open = Arc::new(AtomicBool::new(true));

        let sender_task = tokio::spawn(run_sender(receiver, sink, id));
        let listener_task = tokio::spawn(run_listener(stream, console, id, Arc::clone(&open)));

        Ok(Self {
            id,
            producer: LogProducer::new(sender.clone()),
            sender,
            sender_task,
            listener_task,
            open,
        })
    }

    /// True while the socket is open from both this side and the server's.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    /// Two-phase orderly shutdown.
    ///
    /// Phase 1 enqueues the shutdown sentinel (waiting for room if the queue
    /// is saturated) and joins the sender; FIFO order guarantees every
    /// record enqueued before this call is transmitted first. Records logged
    /// concurrently with the call have no guaranteed position relative to
    /// the sentinel. Phase 2 joins the listener, which the sender's close
    /// handshake unblocks.
    ///
    /// There is no timeout: a server that never completes the close
    /// handshake can stall this call.
    pub async fn shutdown(self) {
        if !self.sender.enqueue_blocking(QueueItem::Shutdown).await {
            debug!("session {}: sender already gone at shutdown", self.id);
        }
        if let Err(e) = self.sender_task.await {
            warn!("session {}: sender task failed: {e}", self.id);
        }

        if let Err(e) = self.listener_task.await {
            warn!("session {}: listener task failed: {e}", self.id);
        }
        self.open.store(false, Ordering::Relaxed);
        info!("session {}: disconnected", self.id);
    }
}

// ── Sender task ───────────────────────────────────────────────────────────────

/// Drains the queue and writes envelope frames until the sentinel arrives or
/// a write fails.
///
/// Failed writes are terminal, not retried, and not surfaced to the caller;
/// the record being written is lost with them. Whatever ends the loop, the
/// task closes the socket on its way out so the listener observes closure.
async fn run_sender(mut queue: LogReceiver, mut sink: WsSink, session: Uuid) {
    loop {
        let envelope = match queue.dequeue().await {
            Some(QueueItem::Log(record)) => ClientEnvelope::ClientLog {
                timestamp: record.timestamp,
                path: record.path,
                line_number: record.line_number,
                encoded_segments: record.encoded_segments,
            },
            Some(QueueItem::Spillover(count)) => {
                warn!("session {session}: reporting {count} records dropped under backpressure");
                ClientEnvelope::ClientSpillover { spillover: count }
            }
            Some(QueueItem::Shutdown) | None => break,
        };

        let json = match serde_json::to_string(&envelope) {
            Ok(json) => json,
            Err(e) => {
                error!("session {session}: envelope serialization failed: {e}");
                continue;
            }
        };

        if let Err(e) = sink.send(WsMessage::Text(json)).await {
            debug!("session {session}: write to server failed; stopping sender: {e}");
            break;
        }
    }

    // Initiate the close handshake. On an already-dead connection this
    // fails too, and the listener exits through its own read error instead.
    if let Err(e) = sink.close().await {
        debug!("session {session}: socket close failed: {e}");
    }
    debug!("session {session}: sender exited");
}

// ── Listener task ─────────────────────────────────────────────────────────────

/// Reads inbound frames until the socket closes, applying `server_info`
/// geometry updates to the capture console.
///
/// Everything else — unrecognized envelope types, malformed JSON, binary
/// frames — is ignored without ending the session, so new server message
/// types never break old clients.
async fn run_listener(
    mut stream: WsStream,
    console: Arc<CaptureConsole>,
    session: Uuid,
    open: Arc<AtomicBool>,
) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => match serde_json::from_str::<ServerEnvelope>(&text) {
                Ok(ServerEnvelope::ServerInfo { width, height }) => {
                    debug!("session {session}: server geometry is {width}x{height}");
                    console.set_size(width, height);
                }
                // Unknown type or malformed frame: not ours to act on.
                Err(_) => {}
            },

            Ok(WsMessage::Close(_)) => {
                debug!("session {session}: server closed the connection");
                break;
            }

            // The devtools protocol is text-only; protocol-level ping/pong
            // is answered by tungstenite itself.
            Ok(WsMessage::Binary(_))
            | Ok(WsMessage::Ping(_))
            | Ok(WsMessage::Pong(_))
            | Ok(WsMessage::Frame(_)) => {}

            Err(e) => {
                debug!("session {session}: read from server failed: {e}");
                break;
            }
        }
    }

    open.store(false, Ordering::Relaxed);
    debug!("session {session}: listener exited");
}
