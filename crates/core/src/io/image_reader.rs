use std::path::Path;

use crate::io::ImageIoError;
use crate::shared::frame::Frame;

/// Domain interface for loading one frame from disk.
pub trait ImageReader: Send {
    /// Read the image at `path` into an RGBA frame carrying `index`.
    fn read(&self, path: &Path, index: usize) -> Result<Frame, ImageIoError>;
}

/// Reads image files via the `image` crate, decoding to RGBA8.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path, index: usize) -> Result<Frame, ImageIoError> {
        let img = image::open(path)
            .map_err(|source| ImageIoError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Frame::new(img.into_raw(), width, height, index))
    }
}
