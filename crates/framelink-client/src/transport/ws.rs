//! WebSocket driver.
//!
//! Responsibilities:
//! - Connect (no retry, no reconnect)
//! - Single outbound writer fed by an mpsc queue (`WsTransport`)
//! - Pump socket events, decode completions and operator controls into the
//!   engine, one at a time, from a single task

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::Message;

use framelink_core::error::{FrameLinkError, Result};

use crate::config::ClientConfig;
use crate::engine::{Control, Engine};
use crate::obs::ClientMetrics;
use crate::sink::Sink;
use crate::transport::codec::{decode, encode, WsInbound};
use crate::transport::{Outbound, Transport};

/// Send half handed to the engine: enqueues for the writer.
#[derive(Debug, Clone)]
pub struct WsTransport {
    tx: mpsc::Sender<Message>,
}

impl WsTransport {
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&self, msg: Outbound) -> Result<()> {
        self.tx
            .send(encode(msg))
            .await
            .map_err(|_| FrameLinkError::Transport("outbound channel closed".into()))
    }
}

/// Connect and run until the socket ends, fails, or the operator quits.
pub async fn run<S: Sink>(
    cfg: &ClientConfig,
    sink: S,
    mut controls: mpsc::Receiver<Control>,
    metrics: Arc<ClientMetrics>,
) -> Result<()> {
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(cfg.client.outbound_queue);
    let (engine, mut decode_rx) =
        Engine::new(WsTransport::new(out_tx), sink, cfg.decoder.frame_mode(), metrics)?;
    let mut engine = engine.with_capture_dir(&cfg.sink.capture_dir);

    let ws_cfg = WebSocketConfig {
        max_message_size: Some(cfg.client.max_frame_bytes),
        max_frame_size: Some(cfg.client.max_frame_bytes),
        ..Default::default()
    };

    tracing::info!(url = %cfg.client.url, "connecting");
    let socket = match tokio_tungstenite::connect_async_with_config(
        cfg.client.url.as_str(),
        Some(ws_cfg),
        true,
    )
    .await
    {
        Ok((socket, _resp)) => socket,
        Err(e) => {
            let err = FrameLinkError::Transport(format!("connect failed: {e}"));
            engine.on_error(&err);
            return Err(err);
        }
    };

    let (mut ws_tx, mut ws_rx) = socket.split();
    engine.on_open();

    let mut controls_open = true;
    loop {
        tokio::select! {
            biased;

            // outbound writer (drained first so the queue never backs up)
            maybe_out = out_rx.recv() => {
                let Some(m) = maybe_out else { break; };
                if let Err(e) = ws_tx.send(m).await {
                    engine.on_error(&FrameLinkError::Transport(format!("send failed: {e}")));
                    break;
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else {
                    engine.on_close();
                    break;
                };
                let msg = match incoming {
                    Ok(m) => m,
                    Err(e) => {
                        engine.on_error(&FrameLinkError::Transport(e.to_string()));
                        break;
                    }
                };
                match decode(msg) {
                    WsInbound::Message(raw) => engine.on_message(raw),
                    // pongs are answered by tungstenite on the next write/flush
                    WsInbound::Ping | WsInbound::Pong => {}
                    WsInbound::Close => {
                        engine.on_close();
                        break;
                    }
                }
            }

            // decode completions
            Some(outcome) = decode_rx.recv() => {
                if let Err(e) = engine.on_decode_complete(outcome).await {
                    engine.on_error(&e);
                    break;
                }
            }

            // operator
            maybe_ctl = controls.recv(), if controls_open => {
                let Some(ctl) = maybe_ctl else {
                    tracing::debug!("control source closed");
                    controls_open = false;
                    continue;
                };
                if ctl == Control::Quit {
                    engine.begin_close();
                    let _ = ws_tx.send(Message::Close(None)).await;
                    engine.on_close();
                    break;
                }
                if let Err(e) = engine.apply(ctl).await {
                    if matches!(e, FrameLinkError::Transport(_)) {
                        engine.on_error(&e);
                        break;
                    }
                    tracing::warn!(code = e.code().as_str(), error = %e, "control failed");
                }
            }
        }
    }

    Ok(())
}
