//! devtools-client library crate.
//!
//! An embedded log-shipping client: applications render diagnostics into a
//! capture console and this crate forwards them to a term-devtools
//! inspection server over a persistent WebSocket, without ever blocking the
//! application.
//!
//! # Architecture
//!
//! ```text
//! application code
//!     │ log() / devlog!            (never blocks, never fails visibly)
//!     ▼
//! CaptureConsole ─ render + extract-and-clear
//!     ▼
//! bounded queue ─ lossy backpressure, spillover accounting
//!     ▼                                   ▲
//! sender task ── client_log frames ──► devtools server
//! listener task ◄── server_info frames ──┘ (geometry sync)
//! ```
//!
//! Two tasks run per open session: the sender drains the queue, the
//! listener applies server geometry updates. `disconnect()` shuts both down
//! in order, draining everything logged before the call.
//!
//! # Delivery model
//!
//! Best effort, at most once. A saturated link costs records (counted and
//! reported as spillover), never memory or caller latency. There is no
//! automatic reconnection; the embedding application decides when to call
//! [`DevtoolsClient::connect`] again.

pub mod client;
pub mod config;
pub mod console;
pub mod error;

mod connection;
mod queue;

pub use client::DevtoolsClient;
pub use config::ClientConfig;
pub use console::CaptureConsole;
pub use error::ConnectError;

/// Logs through a [`DevtoolsClient`], capturing the call site.
///
/// Expands to a [`DevtoolsClient::log`] call with `file!()` and `line!()`
/// filled in, so the devtools server can show where each record came from.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use devtools_client::{devlog, CaptureConsole, ClientConfig, DevtoolsClient};
/// # let client = DevtoolsClient::new(ClientConfig::default(), Arc::new(CaptureConsole::new()));
/// let answer = 42;
/// devlog!(client, "the answer is", answer);
/// ```
#[macro_export]
macro_rules! devlog {
    ($client:expr $(, $object:expr)+ $(,)?) => {
        $client.log(&[$(&$object as &dyn ::std::fmt::Display),+], file!(), line!())
    };
}
