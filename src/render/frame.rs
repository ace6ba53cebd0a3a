use crate::foundation::error::{RotaskError, RotaskResult};
use std::path::Path;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are premultiplied alpha; the compositor paints over an opaque
/// background, so in practice every pixel carries alpha 255 and the data can
/// be written out as straight RGBA.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Write the frame as a PNG file, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> RotaskResult<()> {
        if self.data.len() != (self.width as usize) * (self.height as usize) * 4 {
            return Err(RotaskError::render(
                "frame data length does not match width*height*4",
            ));
        }
        if let Some(parent) = path.parent() {
            use anyhow::Context as _;
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory '{}'", parent.display())
            })?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| RotaskError::render(format!("write png '{}': {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_png_rejects_size_mismatch() {
        let frame = FrameRGBA {
            width: 2,
            height: 2,
            data: vec![0u8; 3],
            premultiplied: true,
        };
        assert!(frame.save_png(Path::new("/tmp/rotask_bad.png")).is_err());
    }
}
