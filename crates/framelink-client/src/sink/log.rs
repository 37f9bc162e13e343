use framelink_core::decode::PixelBuffer;
use framelink_core::error::FrameLinkError;

use super::Sink;

/// Logs every frame and keeps the latest one for captures.
#[derive(Debug, Default)]
pub struct LogSink {
    presented: u64,
    last: Option<PixelBuffer>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Sink for LogSink {
    fn present(&mut self, frame: PixelBuffer) {
        self.presented += 1;
        tracing::debug!(
            n = self.presented,
            width = frame.width(),
            height = frame.height(),
            "frame presented"
        );
        self.last = Some(frame);
    }

    fn frame_lost(&mut self, seq: u64, err: &FrameLinkError) {
        tracing::debug!(seq, code = err.code().as_str(), "frame lost");
    }

    fn last_frame(&self) -> Option<&PixelBuffer> {
        self.last.as_ref()
    }
}
