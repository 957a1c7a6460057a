//! Source image storage.

use crate::error::{Error, Result};

use super::{RGBA_CHANNELS, RGB_CHANNELS};

/// A source texture as held by the session.
///
/// Pixels are stored row-major with the origin at the bottom-left corner:
/// the first `width * channels` values are the bottom row of the picture.
/// Channel values are normalized intensities in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    name: String,
    width: u32,
    height: u32,
    channels: usize,
    pixels: Vec<f32>,
}

impl SourceImage {
    /// Create a source image from a bottom-up pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if `channels` is not 3 or 4, or if the buffer length
    /// does not equal `width * height * channels`.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        channels: usize,
        pixels: Vec<f32>,
    ) -> Result<Self> {
        if channels != RGB_CHANNELS && channels != RGBA_CHANNELS {
            return Err(Error::UnsupportedChannels { channels });
        }

        let expected = width as usize * height as usize * channels;
        if pixels.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            name: name.into(),
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Build a source image by evaluating `f(x, y)` for every pixel, where
    /// `y` counts from the top row. Handy for synthetic textures.
    ///
    /// # Errors
    ///
    /// Returns an error if `channels` is not 3 or 4.
    pub fn from_fn<F>(
        name: impl Into<String>,
        width: u32,
        height: u32,
        channels: usize,
        mut f: F,
    ) -> Result<Self>
    where
        F: FnMut(u32, u32) -> [f32; RGBA_CHANNELS],
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * channels);
        for row in 0..height {
            // bottom-up storage: first stored row is the last picture row
            let y = height - 1 - row;
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y)[..channels.min(RGBA_CHANNELS)]);
            }
        }
        Self::new(name, width, height, channels, pixels)
    }

    /// Registry name of the image.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channel count, 3 or 4.
    #[must_use]
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Flat bottom-up pixel buffer.
    #[must_use]
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_channel_count() {
        let err = SourceImage::new("gray", 2, 2, 1, vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedChannels { channels: 1 }));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let err = SourceImage::new("short", 2, 2, 4, vec![0.0; 15]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSize {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_from_fn_stores_bottom_row_first() {
        let img = SourceImage::from_fn("grad", 1, 2, 3, |_, y| {
            let v = if y == 0 { 1.0 } else { 0.0 };
            [v, v, v, 1.0]
        })
        .unwrap();

        // picture row 0 (top) is white, so it lands second in storage
        assert_eq!(img.pixels(), &[0.0_f32, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(img.channels(), 3);
    }
}
