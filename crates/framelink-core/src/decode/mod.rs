//! Frame decoding: binary payload -> opaque RGBA [`PixelBuffer`].
//!
//! The encoding is fixed when the decoder is built ([`FrameMode`]); nothing
//! on the wire says which one is in use. Both ends agree on it out-of-band,
//! together with the raw-mode dimensions.

pub mod compressed;
pub mod pixel;
pub mod raw;

pub use compressed::decode_compressed;
pub use pixel::PixelBuffer;
pub use raw::{decode_raw_into, RawCopy, RawDecoder};

use crate::error::{FrameLinkError, Result};

/// Upper bound for raw-mode dimensions on either axis.
pub const MAX_DIMENSION: u32 = 8192;

/// Payload encoding, selected once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    /// Consecutive R,G,B triplets, row-major, `width * height` pixels.
    Raw { width: u32, height: u32 },
    /// A self-describing image container (PNG, JPEG).
    Compressed,
}

impl FrameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameMode::Raw { .. } => "raw",
            FrameMode::Compressed => "compressed",
        }
    }
}

/// Decoder state for the active mode.
///
/// Raw mode keeps a persistent canvas: a short payload only overwrites the
/// pixels it covers, the tail keeps whatever the previous frame left there.
#[derive(Debug)]
pub enum FrameDecoder {
    Raw(RawDecoder),
    Compressed,
}

impl FrameDecoder {
    pub fn new(mode: FrameMode) -> Result<Self> {
        match mode {
            FrameMode::Raw { width, height } => {
                if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
                    return Err(FrameLinkError::BadConfig(format!(
                        "raw frame dimensions out of range: {width}x{height}"
                    )));
                }
                Ok(FrameDecoder::Raw(RawDecoder::new(width, height)))
            }
            FrameMode::Compressed => Ok(FrameDecoder::Compressed),
        }
    }

    pub fn mode(&self) -> FrameMode {
        match self {
            FrameDecoder::Raw(r) => FrameMode::Raw { width: r.width(), height: r.height() },
            FrameDecoder::Compressed => FrameMode::Compressed,
        }
    }

    /// Decode synchronously in whichever mode is active.
    ///
    /// Callers that must not block (compressed payloads can be large) should
    /// match on the variant and run [`decode_compressed`] off-thread instead.
    pub fn decode(&mut self, payload: &[u8]) -> Result<PixelBuffer> {
        match self {
            FrameDecoder::Raw(r) => Ok(r.decode(payload).0),
            FrameDecoder::Compressed => decode_compressed(payload),
        }
    }
}
