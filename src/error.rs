//! Custom error types for lod-tiler.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the lod-tiler library.
#[derive(Error, Debug)]
pub enum Error {
    /// No image with this name is registered in the session.
    #[error("image '{name}' not found in session")]
    ImageNotFound { name: String },

    /// The session has no root directory to write outputs under.
    #[error("session has no root directory; save the project or pass a root first")]
    NoRootDirectory,

    /// Source image is not square.
    #[error("image must be square, found {width}x{height}")]
    NotSquare { width: u32, height: u32 },

    /// Source image size is not a multiple of the tile count.
    #[error("image size {width}x{height} is not divisible by {tiles}")]
    NotDivisible { width: u32, height: u32, tiles: u32 },

    /// Source image has a channel layout other than RGB or RGBA.
    #[error("unsupported channel count {channels}: expected 3 (RGB) or 4 (RGBA)")]
    UnsupportedChannels { channels: usize },

    /// Pixel buffer length does not match the declared dimensions.
    #[error("pixel buffer holds {actual} values, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Tile index outside of `0..tile_count`.
    #[error("tile index {index} out of range for {count} tiles")]
    TileIndexOutOfRange { index: u32, count: u32 },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Output format name not recognized.
    #[error("unknown output format '{0}'")]
    UnknownFormat(String),

    /// Resampling filter name not recognized.
    #[error("unknown resampling filter '{0}'")]
    UnknownFilter(String),

    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to save an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to create an output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for lod-tiler operations.
pub type Result<T> = std::result::Result<T, Error>;
