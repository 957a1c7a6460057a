//! Image loading, scaling, and saving utilities.

mod load;
mod save;
mod scale;
mod source;

pub use load::load_image;
pub use save::{save_image, OutputFormat};
pub use scale::{scale_image, ResizeFilter};
pub use source::SourceImage;

use image::{ImageBuffer, Rgba};

/// In-memory tile image: RGBA with normalized `f32` channels, rows top-down.
pub type TileImage = ImageBuffer<Rgba<f32>, Vec<f32>>;

/// Number of channels in RGB images.
pub const RGB_CHANNELS: usize = 3;

/// Number of channels in RGBA images. Tiles always carry this many.
pub const RGBA_CHANNELS: usize = 4;
