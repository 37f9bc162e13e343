//! Compressed mode: the payload is a complete image file (PNG or JPEG).

use super::pixel::PixelBuffer;
use crate::error::{FrameLinkError, Result};

/// Decode an image container into an opaque RGBA buffer of its own size.
///
/// CPU bound; the client runs it on a blocking thread and reports the result
/// as a separate completion event.
pub fn decode_compressed(payload: &[u8]) -> Result<PixelBuffer> {
    let img = image::load_from_memory(payload)
        .map_err(|e| FrameLinkError::DecodeFailure(format!("image decode failed: {e}")))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut px = PixelBuffer::from_raw(width, height, rgba.into_raw())?;
    px.force_opaque();
    Ok(px)
}
