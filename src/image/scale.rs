//! Image scaling.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};

use crate::error::Error;

use super::TileImage;

/// Resampling filter used when producing smaller LOD tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    /// Map to the `image` crate filter.
    #[must_use]
    pub const fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }

    /// Lowercase name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Triangle => "triangle",
            Self::CatmullRom => "catmull-rom",
            Self::Gaussian => "gaussian",
            Self::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "linear" | "bilinear" => Ok(Self::Triangle),
            "catmull-rom" | "catmullrom" | "cubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err(Error::UnknownFilter(s.to_string())),
        }
    }
}

/// Resample `image` to exactly `width` x `height`.
#[must_use]
pub fn scale_image(image: &TileImage, width: u32, height: u32, filter: ResizeFilter) -> TileImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, filter.filter_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_parse_filter_names() {
        assert_eq!("Lanczos3".parse::<ResizeFilter>().unwrap(), ResizeFilter::Lanczos3);
        assert_eq!("cubic".parse::<ResizeFilter>().unwrap(), ResizeFilter::CatmullRom);
        assert!(matches!(
            "box".parse::<ResizeFilter>(),
            Err(Error::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_scale_keeps_flat_color() {
        let img = TileImage::from_pixel(8, 8, Rgba([0.25, 0.5, 0.75, 1.0]));
        let small = scale_image(&img, 2, 2, ResizeFilter::Triangle);

        assert_eq!(small.dimensions(), (2, 2));
        for px in small.pixels() {
            assert!((px[1] - 0.5).abs() < 1e-4);
            assert!((px[3] - 1.0).abs() < 1e-4);
        }
    }
}
