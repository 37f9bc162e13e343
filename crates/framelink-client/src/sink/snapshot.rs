use std::path::PathBuf;

use image::ColorType;

use framelink_core::decode::PixelBuffer;

use super::Sink;

/// Writes presented frames to a single PNG file (headless viewing).
#[derive(Debug)]
pub struct SnapshotSink {
    path: PathBuf,
    every: u32,
    seen: u64,
    last: Option<PixelBuffer>,
}

impl SnapshotSink {
    pub fn new(path: impl Into<PathBuf>, every: u32) -> Self {
        Self {
            path: path.into(),
            every: every.max(1),
            seen: 0,
            last: None,
        }
    }
}

impl Sink for SnapshotSink {
    fn present(&mut self, frame: PixelBuffer) {
        self.seen += 1;
        if self.seen % u64::from(self.every) == 0 {
            if let Err(e) = image::save_buffer(
                &self.path,
                frame.data(),
                frame.width(),
                frame.height(),
                ColorType::Rgba8,
            ) {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot write failed");
            }
        }
        self.last = Some(frame);
    }

    fn last_frame(&self) -> Option<&PixelBuffer> {
        self.last.as_ref()
    }
}
