use std::path::PathBuf;

use thiserror::Error;

pub mod image_reader;
pub mod image_writer;

#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("frame data does not match {width}x{height} RGBA")]
    InvalidFrame { width: u32, height: u32 },
}
