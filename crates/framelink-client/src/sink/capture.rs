//! Client-side frame capture to disk.

use std::path::{Path, PathBuf};

use image::ColorType;

use framelink_core::decode::PixelBuffer;
use framelink_core::error::{FrameLinkError, Result};

/// Write `frame` as `Frame_<YYYY-mm-dd_HH_MM_SS>.png` under `dir`.
pub fn save_capture(frame: &PixelBuffer, dir: &Path) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H_%M_%S");
    let path = dir.join(format!("Frame_{stamp}.png"));

    image::save_buffer(&path, frame.data(), frame.width(), frame.height(), ColorType::Rgba8)
        .map_err(|e| FrameLinkError::Internal(format!("capture write failed: {e}")))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_lands_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut px = PixelBuffer::blank(4, 3);
        px.force_opaque();

        let path = save_capture(&px, dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Frame_") && name.ends_with(".png"));

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (4, 3));
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_capture(&PixelBuffer::blank(1, 1), &dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("capture write failed"));
    }
}
