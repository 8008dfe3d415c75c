use std::path::Path;

use crate::io::ImageIoError;
use crate::shared::frame::Frame;

/// Domain interface for persisting one frame to disk.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), ImageIoError>;
}

/// Writes a frame to an image file using the `image` crate.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), ImageIoError> {
        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ImageIoError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let img =
            image::RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
                .ok_or(ImageIoError::InvalidFrame {
                    width: frame.width(),
                    height: frame.height(),
                })?;

        img.save(path).map_err(|source| ImageIoError::Encode {
            path: path.to_path_buf(),
            source,
        })
    }
}
