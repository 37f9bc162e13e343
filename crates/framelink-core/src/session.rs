//! Streaming state machine (single-credit flow control).
//!
//! The session never performs I/O. Every operation returns what the caller
//! has to send (a [`Command`]) or decode next (a payload), and the caller
//! reports back when a decode has finished.
//!
//! Credit rules:
//! - `STVIS` and `NXTFR` each grant the server exactly one frame.
//! - A grant is answered by the next inbound frame, by `END  `, or by the
//!   loss of the transport.
//! - `NXTFR` is only produced from [`StreamSession::decode_complete`], and only
//!   when no grant is already outstanding. Receipt of a frame never produces it.

use bytes::Bytes;

use crate::protocol::Command;

/// Externally visible streaming state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Connection open, streaming never requested.
    Idle,
    /// `STVIS` sent and not stopped since.
    Streaming,
    /// Stopped by the operator or by a transport failure.
    Stopped,
}

impl StreamState {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamState::Idle => "idle",
            StreamState::Streaming => "streaming",
            StreamState::Stopped => "stopped",
        }
    }
}

/// What to do with a frame that just arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameAction {
    /// Decode this payload now.
    Decode(Bytes),
    /// A decode is in flight; the payload waits in the single deferral slot.
    /// `replaced` is true when an older waiting payload was discarded.
    Deferred { replaced: bool },
}

/// Result of reporting a finished decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// Command to send (`NXTFR` when credit is returned).
    pub command: Option<Command>,
    /// Deferred payload that must be decoded next.
    pub next: Option<Bytes>,
}

/// Per-connection streaming state.
#[derive(Debug)]
pub struct StreamSession {
    state: StreamState,
    pending_decode: bool,
    credit_outstanding: bool,
    deferred: Option<Bytes>,
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSession {
    pub fn new() -> Self {
        Self {
            state: StreamState::Idle,
            pending_decode: false,
            credit_outstanding: false,
            deferred: None,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.state == StreamState::Streaming
    }

    /// A decode is in flight.
    pub fn pending_decode(&self) -> bool {
        self.pending_decode
    }

    /// A frame grant has been sent and not answered yet.
    pub fn credit_outstanding(&self) -> bool {
        self.credit_outstanding
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// IDLE/STOPPED -> STREAMING. No-op while already streaming, since a
    /// second `STVIS` would hand the server a second credit.
    pub fn start_streaming(&mut self) -> Option<Command> {
        if self.is_streaming() {
            tracing::debug!("start ignored: already streaming");
            return None;
        }
        self.state = StreamState::Streaming;
        self.credit_outstanding = true;
        Some(Command::StartStream)
    }

    /// STREAMING -> STOPPED. An in-flight decode still completes, but will
    /// not return credit.
    pub fn stop_streaming(&mut self) -> Option<Command> {
        if !self.is_streaming() {
            tracing::debug!(state = self.state.as_str(), "stop ignored: not streaming");
            return None;
        }
        self.state = StreamState::Stopped;
        self.credit_outstanding = false;
        Some(Command::StopStream)
    }

    /// One-shot capture request; leaves flow control alone.
    pub fn capture_frame(&self) -> Command {
        Command::CaptureFrame
    }

    /// A binary frame arrived.
    pub fn frame_received(&mut self, payload: Bytes) -> FrameAction {
        self.credit_outstanding = false;

        if self.pending_decode {
            let replaced = self.deferred.replace(payload).is_some();
            return FrameAction::Deferred { replaced };
        }

        self.pending_decode = true;
        FrameAction::Decode(payload)
    }

    /// The in-flight decode finished (successfully or not).
    pub fn decode_complete(&mut self) -> Completion {
        if !self.pending_decode {
            tracing::warn!("decode completion without a decode in flight");
            return Completion::default();
        }
        self.pending_decode = false;

        if let Some(next) = self.deferred.take() {
            self.pending_decode = true;
            return Completion { command: None, next: Some(next) };
        }

        if self.is_streaming() && !self.credit_outstanding {
            self.credit_outstanding = true;
            return Completion { command: Some(Command::RequestNextFrame), next: None };
        }

        Completion::default()
    }

    /// Transport closed or failed: STOPPED without sending `END  `.
    pub fn transport_lost(&mut self) {
        self.state = StreamState::Stopped;
        self.credit_outstanding = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Bytes {
        Bytes::from_static(&[1, 2, 3])
    }

    #[test]
    fn start_then_decode_requests_next() {
        let mut s = StreamSession::new();
        assert_eq!(s.state(), StreamState::Idle);
        assert_eq!(s.start_streaming(), Some(Command::StartStream));
        assert!(s.credit_outstanding());

        assert_eq!(s.frame_received(frame()), FrameAction::Decode(frame()));
        assert!(s.pending_decode());
        assert!(!s.credit_outstanding());

        let c = s.decode_complete();
        assert_eq!(c.command, Some(Command::RequestNextFrame));
        assert!(!s.pending_decode());
    }

    #[test]
    fn second_start_is_ignored() {
        let mut s = StreamSession::new();
        s.start_streaming();
        assert_eq!(s.start_streaming(), None);
    }

    #[test]
    fn capture_does_not_touch_flow() {
        let mut s = StreamSession::new();
        s.start_streaming();
        s.frame_received(frame());
        assert_eq!(s.capture_frame(), Command::CaptureFrame);
        assert!(s.is_streaming());
        assert_eq!(s.decode_complete().command, Some(Command::RequestNextFrame));
    }

    #[test]
    fn stop_during_decode_suppresses_next() {
        let mut s = StreamSession::new();
        s.start_streaming();
        s.frame_received(frame());
        assert_eq!(s.stop_streaming(), Some(Command::StopStream));
        assert_eq!(s.state(), StreamState::Stopped);
        assert_eq!(s.decode_complete(), Completion::default());
    }

    #[test]
    fn stop_when_not_streaming_is_noop() {
        let mut s = StreamSession::new();
        assert_eq!(s.stop_streaming(), None);
        assert_eq!(s.state(), StreamState::Idle);
    }

    #[test]
    fn transport_loss_stops_without_command() {
        let mut s = StreamSession::new();
        s.start_streaming();
        s.transport_lost();
        assert_eq!(s.state(), StreamState::Stopped);
        assert!(!s.credit_outstanding());
        assert_eq!(s.start_streaming(), Some(Command::StartStream));
        assert!(s.is_streaming());
    }

    #[test]
    fn overlapping_frame_is_deferred_and_decoded_after() {
        let mut s = StreamSession::new();
        s.start_streaming();
        s.frame_received(frame());

        let late = Bytes::from_static(&[4, 5, 6]);
        assert_eq!(s.frame_received(late.clone()), FrameAction::Deferred { replaced: false });
        assert_eq!(
            s.frame_received(late.clone()),
            FrameAction::Deferred { replaced: true }
        );

        let c = s.decode_complete();
        assert_eq!(c.command, None);
        assert_eq!(c.next, Some(late));
        assert!(s.pending_decode());

        assert_eq!(s.decode_complete().command, Some(Command::RequestNextFrame));
    }

    #[test]
    fn restart_during_decode_does_not_double_credit() {
        let mut s = StreamSession::new();
        s.start_streaming();
        s.frame_received(frame());
        s.stop_streaming();
        assert_eq!(s.start_streaming(), Some(Command::StartStream));
        // old decode finishes while the new STVIS grant is still open
        assert_eq!(s.decode_complete().command, None);
    }

    #[test]
    fn spurious_completion_is_ignored() {
        let mut s = StreamSession::new();
        s.start_streaming();
        assert_eq!(s.decode_complete(), Completion::default());
        assert!(s.credit_outstanding());
    }
}
