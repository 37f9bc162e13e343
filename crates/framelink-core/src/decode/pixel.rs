use crate::error::{FrameLinkError, Result};

/// Decoded RGBA image, `width * height * 4` bytes, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Transparent black buffer of the given size (a blank surface).
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; byte_len(width, height)],
        }
    }

    /// Wrap existing RGBA bytes; the length must match the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if data.len() != byte_len(width, height) {
            return Err(FrameLinkError::Internal(format!(
                "pixel buffer length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of pixel `n` (row-major), if in bounds.
    pub fn pixel(&self, n: usize) -> Option<[u8; 4]> {
        match self.data.get(n * 4..n * 4 + 4)? {
            [r, g, b, a] => Some([*r, *g, *b, *a]),
            _ => None,
        }
    }

    /// Every alpha byte is 255.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|p| p.get(3) == Some(&255))
    }

    /// Force every alpha byte to 255.
    pub fn force_opaque(&mut self) {
        for p in self.data.chunks_exact_mut(4) {
            if let Some(a) = p.get_mut(3) {
                *a = 255;
            }
        }
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}
