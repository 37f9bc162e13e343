//! Event-driven streaming engine.
//!
//! The engine reacts to discrete events and never blocks:
//! - transport: `on_open`, `on_message`, `on_error`, `on_close`
//! - decoder: `on_decode_complete`, delivered through the channel returned by
//!   [`Engine::new`]; it is a separate event from message receipt
//! - operator: `start_streaming`, `stop_streaming`, `capture_frame`,
//!   `save_snapshot`, and the input relay (`on_pointer_event`, `on_key_event`)
//!
//! Flow control lives in [`StreamSession`]; this type moves bytes between the
//! session, the decoder, the sink and the transport.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bytes::Bytes;
use tokio::sync::mpsc;

use framelink_core::decode::{decode_compressed, FrameDecoder, FrameMode, PixelBuffer};
use framelink_core::error::{FrameLinkError, Result};
use framelink_core::protocol::{classify_inbound, Command, Inbound, InputEvent, RawInbound};
use framelink_core::session::{FrameAction, StreamSession, StreamState};

use crate::obs::ClientMetrics;
use crate::sink::{save_capture, Sink};
use crate::transport::{Outbound, Transport};

/// Transport lifecycle as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// Completion event for one frame decode.
#[derive(Debug)]
pub struct DecodeOutcome {
    pub seq: u64,
    pub result: Result<PixelBuffer>,
    pub elapsed: Duration,
}

/// Operator actions (UI buttons, console, input source).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
    Capture,
    /// Write the last presented frame to the capture directory.
    Snapshot,
    Input(InputEvent),
    Quit,
}

pub struct Engine<T: Transport, S: Sink> {
    transport: T,
    sink: S,
    decoder: Arc<Mutex<FrameDecoder>>,
    mode: FrameMode,
    session: StreamSession,
    conn: ConnectionState,
    decode_tx: mpsc::UnboundedSender<DecodeOutcome>,
    metrics: Arc<ClientMetrics>,
    frame_seq: u64,
    capture_dir: PathBuf,
}

impl<T: Transport, S: Sink> Engine<T, S> {
    /// Build an engine in `Connecting` state. The returned receiver yields
    /// decode completions; feed each one back through
    /// [`Engine::on_decode_complete`].
    pub fn new(
        transport: T,
        sink: S,
        mode: FrameMode,
        metrics: Arc<ClientMetrics>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<DecodeOutcome>)> {
        let decoder = FrameDecoder::new(mode)?;
        let (decode_tx, decode_rx) = mpsc::unbounded_channel();
        let engine = Self {
            transport,
            sink,
            decoder: Arc::new(Mutex::new(decoder)),
            mode,
            session: StreamSession::new(),
            conn: ConnectionState::Connecting,
            decode_tx,
            metrics,
            frame_seq: 0,
            capture_dir: PathBuf::from("."),
        };
        Ok((engine, decode_rx))
    }

    pub fn with_capture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.capture_dir = dir.into();
        self
    }

    pub fn state(&self) -> StreamState {
        self.session.state()
    }

    pub fn connection(&self) -> ConnectionState {
        self.conn
    }

    pub fn session(&self) -> &StreamSession {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn mode(&self) -> FrameMode {
        self.mode
    }

    // --------------------
    // Transport events
    // --------------------

    pub fn on_open(&mut self) {
        self.conn = ConnectionState::Open;
        self.session = StreamSession::new();
        tracing::info!(mode = self.mode.as_str(), "connection open");
    }

    /// Inbound message. Never sends anything: credit is returned only once
    /// the decode it triggers has completed.
    pub fn on_message(&mut self, msg: RawInbound) {
        let inbound = match classify_inbound(msg) {
            Ok(m) => m,
            Err(e) => {
                self.metrics.unclassifiable.inc(&[]);
                tracing::warn!(code = e.code().as_str(), error = %e, "inbound message ignored");
                return;
            }
        };

        match inbound {
            Inbound::Text(s) => {
                self.metrics.text_messages.inc(&[]);
                tracing::info!(len = s.len(), text = %s, "text message");
            }
            Inbound::Frame(payload) => {
                self.frame_seq += 1;
                self.metrics.frames_received.inc(&[]);
                tracing::trace!(seq = self.frame_seq, len = payload.len(), "frame received");

                match self.session.frame_received(payload) {
                    FrameAction::Decode(p) => self.begin_decode(p),
                    FrameAction::Deferred { replaced } => {
                        self.metrics.frames_deferred.inc(&[]);
                        if replaced {
                            tracing::warn!(seq = self.frame_seq, "decode busy, older waiting frame dropped");
                        } else {
                            tracing::debug!(seq = self.frame_seq, "decode busy, frame deferred");
                        }
                    }
                }
            }
        }
    }

    /// Transport failure: STOPPED, nothing sent, no retry.
    pub fn on_error(&mut self, err: &FrameLinkError) {
        tracing::error!(
            code = err.code().as_str(),
            error = %err,
            state = self.session.state().as_str(),
            "transport error"
        );
        self.session.transport_lost();
        self.conn = ConnectionState::Closed;
    }

    pub fn on_close(&mut self) {
        tracing::info!(state = self.session.state().as_str(), "connection closed");
        self.session.transport_lost();
        self.conn = ConnectionState::Closed;
    }

    /// Mark the connection as closing (operator quit).
    pub fn begin_close(&mut self) {
        if self.conn == ConnectionState::Open {
            self.conn = ConnectionState::Closing;
        }
    }

    // --------------------
    // Decode path
    // --------------------

    /// Decodes run on the blocking pool in both modes. The session allows
    /// one decode at a time, so the raw canvas lock is never contended.
    fn begin_decode(&mut self, payload: Bytes) {
        let seq = self.frame_seq;
        let tx = self.decode_tx.clone();
        let decoder = Arc::clone(&self.decoder);
        let metrics = Arc::clone(&self.metrics);

        tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let result = run_decode(&decoder, &payload, seq, &metrics);
            if tx.send(DecodeOutcome { seq, result, elapsed: started.elapsed() }).is_err() {
                tracing::warn!(seq, "decode completion dropped, receiver closed");
            }
        });
    }

    /// A decode finished. Presents the frame (or reports its loss), then
    /// either starts the deferred decode or returns credit with `NXTFR`.
    pub async fn on_decode_complete(&mut self, outcome: DecodeOutcome) -> Result<()> {
        let mode = self.mode.as_str();
        self.metrics.decode_duration.observe(&[("mode", mode)], outcome.elapsed);

        match outcome.result {
            Ok(px) => {
                self.metrics.frames_presented.inc(&[]);
                self.sink.present(px);
            }
            Err(e) => {
                // a failed decode still counts as completion for credit
                self.metrics.decode_failures.inc(&[]);
                tracing::warn!(seq = outcome.seq, code = e.code().as_str(), error = %e, "frame lost");
                self.sink.frame_lost(outcome.seq, &e);
            }
        }

        let done = self.session.decode_complete();
        if let Some(next) = done.next {
            self.begin_decode(next);
        }
        if let Some(cmd) = done.command {
            if self.conn == ConnectionState::Open {
                self.send_command(cmd).await?;
            } else {
                tracing::debug!(cmd = %cmd, "connection not open, credit not returned");
            }
        }
        Ok(())
    }

    // --------------------
    // Operator actions
    // --------------------

    pub async fn start_streaming(&mut self) -> Result<()> {
        self.ensure_open()?;
        if let Some(cmd) = self.session.start_streaming() {
            tracing::info!("streaming on");
            self.send_command(cmd).await?;
        }
        Ok(())
    }

    pub async fn stop_streaming(&mut self) -> Result<()> {
        self.ensure_open()?;
        if let Some(cmd) = self.session.stop_streaming() {
            tracing::info!("streaming off");
            self.send_command(cmd).await?;
        }
        Ok(())
    }

    pub async fn capture_frame(&mut self) -> Result<()> {
        self.ensure_open()?;
        let cmd = self.session.capture_frame();
        self.send_command(cmd).await
    }

    /// Save the last presented frame under the capture directory.
    pub fn save_snapshot(&self) -> Result<PathBuf> {
        let frame = self
            .sink
            .last_frame()
            .ok_or_else(|| FrameLinkError::Internal("no frame presented yet".into()))?;
        let path = save_capture(frame, Path::new(&self.capture_dir))?;
        tracing::info!(path = %path.display(), "frame saved");
        Ok(path)
    }

    pub async fn on_pointer_event(&mut self, ev: InputEvent) -> Result<()> {
        self.relay_input(ev).await
    }

    pub async fn on_key_event(&mut self, ev: InputEvent) -> Result<()> {
        self.relay_input(ev).await
    }

    /// Apply an operator control. `Quit` is handled by the driver.
    pub async fn apply(&mut self, ctl: Control) -> Result<()> {
        match ctl {
            Control::Start => self.start_streaming().await,
            Control::Stop => self.stop_streaming().await,
            Control::Capture => self.capture_frame().await,
            Control::Snapshot => self.save_snapshot().map(|_| ()),
            Control::Input(ev @ InputEvent::Pointer { .. }) => self.on_pointer_event(ev).await,
            Control::Input(ev @ InputEvent::Key { .. }) => self.on_key_event(ev).await,
            Control::Quit => {
                self.begin_close();
                Ok(())
            }
        }
    }

    // --------------------
    // Send path
    // --------------------

    /// Input goes straight out, independent of frame credit.
    async fn relay_input(&mut self, ev: InputEvent) -> Result<()> {
        self.ensure_open()?;
        let kind = match ev {
            InputEvent::Pointer { .. } => "pointer",
            InputEvent::Key { .. } => "key",
        };
        self.transport.send(Outbound::Binary(ev.encode())).await?;
        self.metrics.input_events_sent.inc(&[("kind", kind)]);
        Ok(())
    }

    async fn send_command(&mut self, cmd: Command) -> Result<()> {
        tracing::debug!(cmd = %cmd, "send");
        self.transport.send(Outbound::from(cmd)).await?;
        self.metrics.commands_sent.inc(&[("token", cmd.as_str().trim_end())]);
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.conn == ConnectionState::Open {
            Ok(())
        } else {
            Err(FrameLinkError::NotConnected)
        }
    }
}

fn run_decode(
    decoder: &Mutex<FrameDecoder>,
    payload: &[u8],
    seq: u64,
    metrics: &ClientMetrics,
) -> Result<PixelBuffer> {
    let mut decoder = decoder
        .lock()
        .map_err(|_| FrameLinkError::Internal("decoder lock poisoned".into()))?;

    match &mut *decoder {
        FrameDecoder::Raw(raw) => {
            let (px, copy) = raw.decode(payload);
            if copy.is_short() {
                metrics.short_payloads.inc(&[]);
                tracing::warn!(
                    seq,
                    len = payload.len(),
                    expected = raw.expected_len(),
                    copied = copy.copied,
                    "short raw payload, tail keeps previous pixels"
                );
            }
            Ok(px)
        }
        FrameDecoder::Compressed => decode_compressed(payload),
    }
}
