//! Integration tests against a stub devtools server.
//!
//! These tests exercise the client through its public API only, the same way
//! an embedding application uses it. The stub accepts one WebSocket session,
//! records every text frame the client transmits, and pushes arbitrary raw
//! frames back — which is all a real devtools server does from the client's
//! point of view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use devtools_client::{devlog, CaptureConsole, ClientConfig, DevtoolsClient};
use devtools_core::{decode_segments, ClientEnvelope};

// ── Stub server ───────────────────────────────────────────────────────────────

struct StubServer {
    port: u16,
    /// Text frames received from the client, in arrival order.
    received: mpsc::UnboundedReceiver<String>,
    /// Raw text frames to push to the client.
    push: mpsc::UnboundedSender<String>,
    /// Completes once the session ends (client close or transport error).
    task: JoinHandle<()>,
}

/// Spawns a stub server accepting exactly one devtools session.
async fn stub_server() -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let port = listener.local_addr().expect("stub local addr").port();

    let (received_tx, received) = mpsc::unbounded_channel();
    let (push, mut push_rx) = mpsc::unbounded_channel::<String>();

    let task = tokio::spawn(async move {
        let (stream, _peer) = listener.accept().await.expect("accept client");
        let ws = accept_async(stream).await.expect("websocket handshake");
        let (mut sink, mut stream) = ws.split();

        loop {
            tokio::select! {
                frame = stream.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        let _ = received_tx.send(text);
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                },
                Some(text) = push_rx.recv() => {
                    if sink.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    StubServer {
        port,
        received,
        push,
        task,
    }
}

fn config(port: u16) -> ClientConfig {
    ClientConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..ClientConfig::default()
    }
}

/// Polls until the console reports `expected` or two seconds pass.
async fn wait_for_size(console: &CaptureConsole, expected: (u16, u16)) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if console.size() == expected {
            return true;
        }
        sleep(Duration::from_millis(10)).await;
    }
    false
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn connect_then_disconnect_leaves_nothing_running() {
    let server = stub_server().await;
    let console = Arc::new(CaptureConsole::new());
    let mut client = DevtoolsClient::new(config(server.port), console);

    client.connect().await.expect("connect to stub");
    assert!(client.is_connected());

    client.disconnect().await;
    assert!(!client.is_connected());

    // The stub observed the client's close handshake and wound down too —
    // nothing is left holding the socket.
    timeout(Duration::from_secs(2), server.task)
        .await
        .expect("stub session should end after disconnect")
        .expect("stub task should not panic");
}

#[tokio::test]
async fn connect_twice_is_a_noop() {
    let server = stub_server().await;
    let console = Arc::new(CaptureConsole::new());
    let mut client = DevtoolsClient::new(config(server.port), console);

    client.connect().await.expect("first connect");
    client.connect().await.expect("second connect is a no-op");
    assert!(client.is_connected());

    client.disconnect().await;
}

#[tokio::test]
async fn refused_connection_fails_without_a_session() {
    // Bind a port, then free it: nothing is listening there anymore.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let console = Arc::new(CaptureConsole::new());
    let mut client = DevtoolsClient::new(config(port), console);

    let result = client.connect().await;

    assert!(result.is_err());
    assert!(!client.is_connected());
}

#[tokio::test]
async fn server_side_closure_flips_is_connected() {
    // A stub that hangs up right after the handshake.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    tokio::spawn(async move {
        let (stream, _peer) = listener.accept().await.expect("accept");
        let mut ws = accept_async(stream).await.expect("handshake");
        let _ = ws.close(None).await;
    });

    let console = Arc::new(CaptureConsole::new());
    let mut client = DevtoolsClient::new(config(port), console);
    client.connect().await.expect("connect");

    let deadline = Instant::now() + Duration::from_secs(2);
    while client.is_connected() && Instant::now() < deadline {
        sleep(Duration::from_millis(10)).await;
    }
    assert!(!client.is_connected());

    // Disconnecting a half-dead session must still terminate cleanly.
    client.disconnect().await;
}

// ── Geometry synchronization ──────────────────────────────────────────────────

#[tokio::test]
async fn server_info_resizes_console_and_unknown_types_do_not() {
    let server = stub_server().await;
    let console = Arc::new(CaptureConsole::new());
    let mut client = DevtoolsClient::new(config(server.port), Arc::clone(&console));
    client.connect().await.expect("connect");

    // The real server sends its geometry immediately after the handshake.
    server
        .push
        .send(r#"{"type":"server_info","payload":{"width":100,"height":40}}"#.to_string())
        .expect("push server_info");
    assert!(
        wait_for_size(&console, (100, 40)).await,
        "console should adopt the server-reported geometry"
    );

    // Unknown envelope types and outright garbage must both be ignored.
    server
        .push
        .send(r#"{"type":"server_metrics","payload":{"fps":60}}"#.to_string())
        .expect("push unknown type");
    server
        .push
        .send("{this is not json".to_string())
        .expect("push malformed frame");
    sleep(Duration::from_millis(100)).await;

    assert_eq!(console.size(), (100, 40), "geometry must be unchanged");
    assert!(client.is_connected(), "bad frames must not end the session");

    client.disconnect().await;
}

// ── Log transmission ──────────────────────────────────────────────────────────

#[tokio::test]
async fn log_transmits_one_client_log_envelope() {
    let mut server = stub_server().await;
    let console = Arc::new(CaptureConsole::new());
    let mut client = DevtoolsClient::new(config(server.port), console);
    client.connect().await.expect("connect");

    client.log(&[&"hello"], "app.py", 5);

    let frame = timeout(Duration::from_secs(2), server.received.recv())
        .await
        .expect("a frame should arrive promptly")
        .expect("stub receive channel open");
    let envelope: ClientEnvelope = serde_json::from_str(&frame).expect("valid client envelope");

    let ClientEnvelope::ClientLog {
        timestamp,
        path,
        line_number,
        encoded_segments,
    } = envelope
    else {
        panic!("expected a client_log envelope, got {frame}");
    };
    assert_eq!(path, "app.py");
    assert_eq!(line_number, 5);
    assert!(timestamp > 1_672_531_200, "timestamp must be unix seconds");

    let segments = decode_segments(&encoded_segments).expect("decodable payload");
    let text: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert!(text.contains("hello"), "decoded payload should render 'hello'");

    client.disconnect().await;
}

#[tokio::test]
async fn devlog_macro_captures_the_call_site() {
    let mut server = stub_server().await;
    let console = Arc::new(CaptureConsole::new());
    let mut client = DevtoolsClient::new(config(server.port), console);
    client.connect().await.expect("connect");

    devlog!(client, "macro", "shipped");

    let frame = timeout(Duration::from_secs(2), server.received.recv())
        .await
        .expect("a frame should arrive promptly")
        .expect("stub receive channel open");
    let envelope: ClientEnvelope = serde_json::from_str(&frame).expect("valid client envelope");

    let ClientEnvelope::ClientLog {
        path, line_number, ..
    } = envelope
    else {
        panic!("expected a client_log envelope");
    };
    assert!(
        path.ends_with("client_integration.rs"),
        "path should be the call site file, got {path}"
    );
    assert!(line_number > 0);

    client.disconnect().await;
}

#[tokio::test]
async fn disconnect_drains_everything_logged_before_it() {
    let mut server = stub_server().await;
    let console = Arc::new(CaptureConsole::new());
    let mut client = DevtoolsClient::new(config(server.port), console);
    client.connect().await.expect("connect");

    for i in 1..=20u32 {
        client.log(&[&"entry", &i], "drain.rs", i);
    }
    client.disconnect().await;

    // Everything logged before disconnect() must have hit the wire, in order.
    let mut seen = Vec::new();
    while let Ok(Some(frame)) = timeout(Duration::from_millis(200), server.received.recv()).await {
        let envelope: ClientEnvelope = serde_json::from_str(&frame).expect("valid envelope");
        if let ClientEnvelope::ClientLog { line_number, .. } = envelope {
            seen.push(line_number);
        }
    }
    assert_eq!(seen, (1..=20).collect::<Vec<u32>>());
}
