//! Image saving utilities.

use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use image::{DynamicImage, ImageFormat};

use crate::error::{Error, Result};

use super::TileImage;

/// Encoding used for every tile written in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Png,
    #[default]
    Jpeg,
    Bmp,
    Targa,
    Tiff,
}

impl OutputFormat {
    /// Uppercase format name (`PNG`, `JPEG`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Bmp => "BMP",
            Self::Targa => "TARGA",
            Self::Tiff => "TIFF",
        }
    }

    /// File extension including the leading dot.
    ///
    /// JPEG maps to `.jpg`; every other format uses its lowercase name.
    #[must_use]
    pub fn extension(self) -> String {
        match self {
            Self::Jpeg => ".jpg".to_string(),
            other => format!(".{}", other.name().to_lowercase()),
        }
    }

    /// Matching `image` crate format.
    #[must_use]
    pub const fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
            Self::Targa => ImageFormat::Tga,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PNG" => Ok(Self::Png),
            "JPEG" | "JPG" => Ok(Self::Jpeg),
            "BMP" => Ok(Self::Bmp),
            "TARGA" | "TGA" => Ok(Self::Targa),
            "TIFF" | "TIF" => Ok(Self::Tiff),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Save a tile image to `path`.
///
/// Float channels are clamped to `[0, 1]` and quantized to 8 bits. JPEG has
/// no alpha channel, so alpha is dropped for that format.
///
/// # Arguments
///
/// * `image` - RGBA tile, rows top-down
/// * `path` - Output file path
/// * `format` - Output encoding
/// * `quality` - JPEG quality (1-100), ignored for other formats
///
/// # Errors
///
/// Returns an error if the image cannot be saved.
pub fn save_image<P: AsRef<Path>>(
    image: &TileImage,
    path: P,
    format: OutputFormat,
    quality: u8,
) -> Result<()> {
    let path = path.as_ref();

    let dynamic = DynamicImage::ImageRgba32F(image.clone());
    let mut encoded = Vec::new();

    match format {
        OutputFormat::Jpeg => {
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut encoded, quality);
            DynamicImage::ImageRgb8(dynamic.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|source| Error::ImageSave {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        _ => {
            DynamicImage::ImageRgba8(dynamic.to_rgba8())
                .write_to(&mut Cursor::new(&mut encoded), format.image_format())
                .map_err(|source| Error::ImageSave {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
    }

    // single write call: an I/O failure is returned, never dropped
    fs::write(path, &encoded)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Jpeg.extension(), ".jpg");
        assert_eq!(OutputFormat::Png.extension(), ".png");
        assert_eq!(OutputFormat::Targa.extension(), ".targa");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("jpeg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("JPG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("Png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert!(matches!(
            "webm".parse::<OutputFormat>(),
            Err(Error::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_png_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        let img = TileImage::from_pixel(4, 4, Rgba([1.0, 0.0, 0.0, 0.5]));

        save_image(&img, &path, OutputFormat::Png, 95).unwrap();

        let reloaded = image::open(&path).unwrap();
        let px = reloaded.get_pixel(1, 1);
        assert_eq!(px[0], 255);
        assert!((127..=128).contains(&px[3]));
    }

    #[test]
    fn test_jpeg_writes_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.jpg");
        let img = TileImage::from_pixel(8, 8, Rgba([0.5, 0.5, 0.5, 1.0]));

        save_image(&img, &path, OutputFormat::Jpeg, 90).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!(reloaded.dimensions(), (8, 8));
        assert!(!reloaded.color().has_alpha());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_full_disk_is_reported() {
        let img = TileImage::from_pixel(8, 8, Rgba([0.5, 0.5, 0.5, 1.0]));

        for format in [OutputFormat::Jpeg, OutputFormat::Png] {
            let err = save_image(&img, "/dev/full", format, 90).unwrap_err();
            assert!(matches!(err, Error::Io(_)), "{format}: {err}");
        }
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tile.png");
        let img = TileImage::new(2, 2);

        assert!(save_image(&img, &path, OutputFormat::Png, 95).is_err());
    }
}
