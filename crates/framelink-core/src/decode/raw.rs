//! Raw mode: tri-byte pixels, no header.

use super::pixel::PixelBuffer;

/// Outcome of copying one raw payload onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCopy {
    /// Complete pixels taken from the payload.
    pub copied: usize,
    /// Pixels the canvas holds.
    pub expected: usize,
}

impl RawCopy {
    /// Payload did not cover the whole canvas.
    pub fn is_short(&self) -> bool {
        self.copied < self.expected
    }
}

/// Copy R,G,B triplets onto an RGBA canvas, alpha forced to 255.
///
/// Stops at the last complete pixel of the shorter side. Canvas pixels past
/// that point are left untouched, and trailing payload bytes are ignored.
pub fn decode_raw_into(payload: &[u8], canvas: &mut PixelBuffer) -> RawCopy {
    let expected = canvas.data().len() / 4;
    let mut copied = 0;

    for (dst, src) in canvas.data_mut().chunks_exact_mut(4).zip(payload.chunks_exact(3)) {
        if let ([r, g, b, a], [sr, sg, sb]) = (dst, src) {
            *r = *sr;
            *g = *sg;
            *b = *sb;
            *a = 255;
            copied += 1;
        }
    }

    RawCopy { copied, expected }
}

/// Raw-mode decoder owning the persistent canvas.
#[derive(Debug)]
pub struct RawDecoder {
    canvas: PixelBuffer,
}

impl RawDecoder {
    /// Canvas starts opaque black, so a short first payload still yields
    /// an opaque frame.
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = PixelBuffer::blank(width, height);
        canvas.force_opaque();
        Self { canvas }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Bytes a complete payload carries.
    pub fn expected_len(&self) -> usize {
        self.width() as usize * self.height() as usize * 3
    }

    /// Decode onto the canvas and hand out a snapshot of it.
    pub fn decode(&mut self, payload: &[u8]) -> (PixelBuffer, RawCopy) {
        let copy = decode_raw_into(payload, &mut self.canvas);
        (self.canvas.clone(), copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn full_payload_copies_triplets_in_order() {
        let (w, h) = (3u32, 2u32);
        let payload = ramp(3 * 6);
        let mut d = RawDecoder::new(w, h);
        let (px, copy) = d.decode(&payload);

        assert!(!copy.is_short());
        assert_eq!(copy.copied, 6);
        assert!(px.is_opaque());
        for (n, src) in payload.chunks_exact(3).enumerate() {
            assert_eq!(px.pixel(n), Some([src[0], src[1], src[2], 255]));
        }
    }

    #[test]
    fn one_pixel_short_keeps_last_pixel() {
        let mut d = RawDecoder::new(2, 2);
        d.decode(&[10u8; 12]);

        let (px, copy) = d.decode(&[20u8; 9]);
        assert!(copy.is_short());
        assert_eq!(copy.copied, 3);
        assert_eq!(px.pixel(2), Some([20, 20, 20, 255]));
        assert_eq!(px.pixel(3), Some([10, 10, 10, 255]));
    }

    #[test]
    fn short_on_fresh_canvas_leaves_tail_opaque_black() {
        let mut d = RawDecoder::new(2, 1);
        let (px, _) = d.decode(&[1, 2, 3, 4, 5]);
        assert_eq!(px.pixel(0), Some([1, 2, 3, 255]));
        assert_eq!(px.pixel(1), Some([0, 0, 0, 255]));
        assert!(px.is_opaque());
    }

    #[test]
    fn empty_first_payload_is_still_opaque() {
        let mut d = RawDecoder::new(3, 3);
        let (px, copy) = d.decode(&[]);
        assert_eq!(copy.copied, 0);
        assert!(px.is_opaque());
    }

    #[test]
    fn extra_bytes_are_ignored() {
        let mut d = RawDecoder::new(1, 1);
        let (px, copy) = d.decode(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(copy.copied, 1);
        assert_eq!(px.data(), &[1, 2, 3, 255]);
    }

    #[test]
    fn empty_payload_copies_nothing() {
        let mut d = RawDecoder::new(4, 4);
        let (_, copy) = d.decode(&[]);
        assert_eq!(copy, RawCopy { copied: 0, expected: 16 });
        assert_eq!(d.expected_len(), 48);
    }
}
