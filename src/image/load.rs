//! Image loading utilities.

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::error::{Error, Result};

use super::{SourceImage, RGBA_CHANNELS, RGB_CHANNELS};

/// Load an image from disk as a [`SourceImage`].
///
/// The image is:
/// 1. Decoded from the specified path (format inferred from content)
/// 2. Converted to normalized `f32` RGB, or RGBA if the file has alpha
/// 3. Re-ordered so that rows run bottom-up
///
/// The registry name is the file name of `path`.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<SourceImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    from_dynamic(name, &img)
}

/// Convert a decoded image into bottom-up float storage.
pub(crate) fn from_dynamic(name: String, img: &DynamicImage) -> Result<SourceImage> {
    let (width, height) = img.dimensions();

    let (channels, top_down) = if img.color().has_alpha() {
        (RGBA_CHANNELS, img.to_rgba32f().into_raw())
    } else {
        (RGB_CHANNELS, img.to_rgb32f().into_raw())
    };

    let stride = width as usize * channels;
    let mut pixels = Vec::with_capacity(top_down.len());
    if stride > 0 {
        for row in top_down.chunks_exact(stride).rev() {
            pixels.extend_from_slice(row);
        }
    }

    SourceImage::new(name, width, height, channels, pixels)
}
