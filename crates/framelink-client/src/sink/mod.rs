//! Frame sinks (decoded frames leave the engine here).

pub mod capture;
pub mod log;
pub mod snapshot;

pub use capture::save_capture;
pub use log::LogSink;
pub use snapshot::SnapshotSink;

use framelink_core::decode::PixelBuffer;
use framelink_core::error::FrameLinkError;

/// Consumer of decoded frames.
///
/// `present` is called once per completed decode, from the decode-complete
/// handler, and takes ownership of the buffer.
pub trait Sink: Send {
    fn present(&mut self, frame: PixelBuffer);

    /// A frame was received but could not be decoded.
    fn frame_lost(&mut self, _seq: u64, _err: &FrameLinkError) {}

    /// Most recently presented frame, if the sink keeps one.
    fn last_frame(&self) -> Option<&PixelBuffer> {
        None
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn present(&mut self, frame: PixelBuffer) {
        (**self).present(frame)
    }

    fn frame_lost(&mut self, seq: u64, err: &FrameLinkError) {
        (**self).frame_lost(seq, err)
    }

    fn last_frame(&self) -> Option<&PixelBuffer> {
        (**self).last_frame()
    }
}
