//! devtools-client — stdin log shipper.
//!
//! A small diagnostic binary around the client library: it connects to a
//! devtools server, ships every line read from stdin as a log record, and
//! disconnects cleanly on EOF or Ctrl+C. Handy for smoke-testing a server
//! and for piping an existing process's output into devtools:
//!
//! ```text
//! tail -f app.log | devtools-client --host 127.0.0.1 --port 8081
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable                   | Default     |
//! |----------------------------|-------------|
//! | `DEVTOOLS_HOST`            | `127.0.0.1` |
//! | `DEVTOOLS_PORT`            | `8081`      |
//! | `DEVTOOLS_CONNECT_TIMEOUT` | `3` (secs)  |

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use devtools_client::{CaptureConsole, ClientConfig, DevtoolsClient};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Ship stdin lines to a term-devtools server.
#[derive(Debug, Parser)]
#[command(
    name = "devtools-client",
    about = "Ship stdin lines to a term-devtools inspection server",
    version
)]
struct Cli {
    /// Hostname or IP address of the devtools server.
    #[arg(long, default_value = "127.0.0.1", env = "DEVTOOLS_HOST")]
    host: String,

    /// Port of the devtools server.
    #[arg(long, default_value_t = 8081, env = "DEVTOOLS_PORT")]
    port: u16,

    /// Connect timeout in seconds.
    #[arg(long, default_value_t = 3, env = "DEVTOOLS_CONNECT_TIMEOUT")]
    connect_timeout: u64,
}

impl Cli {
    fn into_client_config(self) -> ClientConfig {
        ClientConfig {
            host: self.host,
            port: self.port,
            connect_timeout: Duration::from_secs(self.connect_timeout),
            ..ClientConfig::default()
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.into_client_config();
    let url = config.url();

    let console = Arc::new(CaptureConsole::new());
    let mut client = DevtoolsClient::new(config, console);

    client
        .connect()
        .await
        .with_context(|| format!("could not reach a devtools server at {url}"))?;
    info!("connected to {url}; shipping stdin (Ctrl+C to stop)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_number: u32 = 0;

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    line_number += 1;
                    client.log(&[&line], "stdin", line_number);
                }
                Ok(None) => {
                    info!("stdin closed after {line_number} lines");
                    break;
                }
                Err(e) => {
                    warn!("stdin read failed: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("received Ctrl+C — disconnecting");
                break;
            }
        }
    }

    // Drains everything shipped above before closing the socket.
    client.disconnect().await;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
