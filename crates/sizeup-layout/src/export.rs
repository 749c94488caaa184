//! PNG export of the rendered frame
//!
//! The renderer owns the drawing surface; it hands over pixels through
//! [`FrameSource`]. Export is requested by the session and carried out after
//! the next frame has been drawn so the capture reflects the latest state.

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// Errors raised while exporting a frame
#[derive(Error, Debug)]
pub enum ExportError {
    /// No drawing surface is attached
    #[error("No render surface available")]
    NoSurface,

    /// The surface refused to hand over its pixels
    #[error("Failed to capture frame: {0}")]
    Capture(String),

    /// Pixel buffer does not match the declared size
    #[error("Frame buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Captured RGBA8 pixels, row-major, top row first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Buffer filled with a single color
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self::new(width, height, rgba.repeat(count))
    }

    fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Anything that can hand over the pixels of the last drawn frame
pub trait FrameSource {
    fn capture(&self) -> Result<FrameBuffer, ExportError>;
}

/// Encode a frame as PNG bytes
pub fn encode_png(frame: &FrameBuffer) -> Result<Vec<u8>, ExportError> {
    let expected = frame.expected_len();
    if frame.pixels.len() != expected {
        return Err(ExportError::BufferSize {
            width: frame.width,
            height: frame.height,
            expected,
            actual: frame.pixels.len(),
        });
    }

    let image = RgbaImage::from_raw(frame.width, frame.height, frame.pixels.clone()).ok_or(
        ExportError::BufferSize {
            width: frame.width,
            height: frame.height,
            expected,
            actual: frame.pixels.len(),
        },
    )?;

    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image).write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Capture `source` and write it as a PNG at `path`
pub fn export_frame(source: &dyn FrameSource, path: &Path) -> Result<PathBuf, ExportError> {
    let result = source
        .capture()
        .and_then(|frame| encode_png(&frame))
        .and_then(|bytes| std::fs::write(path, bytes).map_err(ExportError::from));

    match result {
        Ok(()) => {
            info!("Exported comparison image to {}", path.display());
            Ok(path.to_path_buf())
        }
        Err(e) => {
            error!("Export to {} failed: {}", path.display(), e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let frame = FrameBuffer::solid(4, 3, [255, 255, 255, 255]);
        let bytes = encode_png(&frame).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let frame = FrameBuffer::new(2, 2, vec![0; 15]);
        assert!(matches!(
            encode_png(&frame),
            Err(ExportError::BufferSize {
                expected: 16,
                actual: 15,
                ..
            })
        ));
    }
}
