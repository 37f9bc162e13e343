//! End-to-end: the client driver against a minimal frame server on loopback.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use framelink_client::config;
use framelink_client::obs::ClientMetrics;
use framelink_client::sink::LogSink;
use framelink_client::transport::ws;
use framelink_client::Control;
use framelink_core::protocol::{Command, InputEvent};

/// Server side of the protocol: one raw frame per grant, records every
/// control token it sees.
async fn serve_once(listener: TcpListener, frames: usize, seen: mpsc::UnboundedSender<Vec<u8>>) {
    let (tcp, _) = listener.accept().await.unwrap();
    let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
    let mut sent = 0;

    while let Some(Ok(msg)) = ws.next().await {
        let payload = match msg {
            Message::Text(s) => s.into_bytes(),
            Message::Binary(b) => b,
            Message::Close(_) => break,
            _ => continue,
        };
        let _ = seen.send(payload.clone());

        if let Some(cmd) = Command::from_token(&payload) {
            if cmd.grants_frame() && sent < frames {
                sent += 1;
                ws.send(Message::Binary(vec![sent as u8; 2 * 2 * 3])).await.unwrap();
            }
        }
    }
}

#[tokio::test]
async fn streams_with_single_credit() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
    let server = tokio::spawn(serve_once(listener, 3, seen_tx));

    let cfg = config::load_from_str(&format!(
        "version: 1\nclient:\n  url: \"ws://{addr}/\"\ndecoder:\n  width: 2\n  height: 2\n"
    ))
    .unwrap();

    let metrics = Arc::new(ClientMetrics::default());
    let (ctl_tx, ctl_rx) = mpsc::channel(8);
    let client = tokio::spawn({
        let metrics = Arc::clone(&metrics);
        async move { ws::run(&cfg, LogSink::new(), ctl_rx, metrics).await }
    });

    ctl_tx.send(Control::Start).await.unwrap();

    // STVIS + 3 x NXTFR (one per decoded frame; the third asks for a frame
    // the server no longer sends)
    let mut tokens = Vec::new();
    while tokens.len() < 4 {
        let t = tokio::time::timeout(Duration::from_secs(5), seen_rx.recv())
            .await
            .expect("server saw too few tokens")
            .unwrap();
        tokens.push(t);
    }
    assert_eq!(tokens[0], b"STVIS".to_vec());
    assert!(tokens[1..].iter().all(|t| t == b"NXTFR"));

    ctl_tx.send(Control::Input(InputEvent::key_pressed(65))).await.unwrap();
    let input = tokio::time::timeout(Duration::from_secs(5), seen_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(input, InputEvent::key_pressed(65).encode().to_vec());

    ctl_tx.send(Control::Stop).await.unwrap();
    let stop = tokio::time::timeout(Duration::from_secs(5), seen_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stop, b"END  ".to_vec());

    ctl_tx.send(Control::Quit).await.unwrap();
    client.await.unwrap().unwrap();
    server.await.unwrap();

    assert_eq!(metrics.frames_presented.get(&[]), 3);
    assert_eq!(metrics.commands_sent.get(&[("token", "NXTFR")]), 3);
}

#[tokio::test]
async fn connect_failure_is_a_transport_error() {
    // bind then drop to get a port nobody listens on
    let addr = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };
    let cfg = config::load_from_str(&format!("version: 1\nclient:\n  url: \"ws://{addr}/\"\n")).unwrap();
    let (_ctl_tx, ctl_rx) = mpsc::channel(1);

    let err = ws::run(&cfg, LogSink::new(), ctl_rx, Arc::default()).await.unwrap_err();
    assert_eq!(err.code().as_str(), "TRANSPORT");
}
