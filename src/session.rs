//! Session: named source images, the output root, and scoped tile images.
//!
//! A [`Session`] stands in for the project a texture lives in. It owns the
//! registry of loaded source images and knows the directory outputs are
//! written under. Temporary tile images are handed out as [`TileHandle`]s
//! that release themselves when dropped.

use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::image::{self, OutputFormat, ResizeFilter, SourceImage, TileImage, RGBA_CHANNELS};

/// Registry of source images plus the output root.
#[derive(Debug, Default)]
pub struct Session {
    root: Option<PathBuf>,
    images: HashMap<String, SourceImage>,
    live_tiles: Cell<usize>,
}

impl Session {
    /// Create a session. `None` models a project that was never saved.
    #[must_use]
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            images: HashMap::new(),
            live_tiles: Cell::new(0),
        }
    }

    /// Create a session rooted at `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(Some(root.into()))
    }

    /// Register an image under its name, returning any image it replaced.
    pub fn insert(&mut self, image: SourceImage) -> Option<SourceImage> {
        tracing::debug!(
            "Registered image '{}' ({}x{}, {} channels)",
            image.name(),
            image.width(),
            image.height(),
            image.channels()
        );
        self.images.insert(image.name().to_string(), image)
    }

    /// Decode an image file and register it under its file name.
    ///
    /// Returns the registry name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be decoded.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
        let source = image::load_image(path)?;
        let name = source.name().to_string();
        self.insert(source);
        Ok(name)
    }

    /// Look up a registered image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageNotFound`] if no image has that name.
    pub fn image(&self, name: &str) -> Result<&SourceImage> {
        self.images.get(name).ok_or_else(|| Error::ImageNotFound {
            name: name.to_string(),
        })
    }

    /// Directory outputs are written under.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRootDirectory`] if the session has no root.
    pub fn root(&self) -> Result<&Path> {
        match self.root.as_deref() {
            Some(root) if !root.as_os_str().is_empty() => Ok(root),
            _ => Err(Error::NoRootDirectory),
        }
    }

    /// Number of tile images currently acquired and not yet released.
    #[must_use]
    pub fn live_tiles(&self) -> usize {
        self.live_tiles.get()
    }

    /// Acquire a temporary RGBA tile image from bottom-up pixels.
    ///
    /// The image is released when the returned handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels` does not hold `width * height * 4` values.
    pub fn acquire_tile(
        &self,
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixels: &[f32],
    ) -> Result<TileHandle<'_>> {
        let expected = width as usize * height as usize * RGBA_CHANNELS;
        if pixels.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        let stride = width as usize * RGBA_CHANNELS;
        let mut top_down = Vec::with_capacity(expected);
        if stride > 0 {
            for row in pixels.chunks_exact(stride).rev() {
                top_down.extend_from_slice(row);
            }
        }

        let image = TileImage::from_raw(width, height, top_down).ok_or(Error::BufferSize {
            expected,
            actual: pixels.len(),
        })?;

        let name = name.into();
        self.live_tiles.set(self.live_tiles.get() + 1);
        tracing::debug!("Acquired tile image '{name}' ({width}x{height})");

        Ok(TileHandle {
            session: self,
            name,
            image,
        })
    }
}

/// Scoped tile image owned by a [`Session`].
#[derive(Debug)]
pub struct TileHandle<'s> {
    session: &'s Session,
    name: String,
    image: TileImage,
}

impl TileHandle<'_> {
    /// Current pixel data, rows top-down.
    #[must_use]
    pub const fn image(&self) -> &TileImage {
        &self.image
    }

    /// Current `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Resample the image in place.
    pub fn scale(&mut self, width: u32, height: u32, filter: ResizeFilter) {
        self.image = image::scale_image(&self.image, width, height, filter);
    }

    /// Encode the current image to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be saved.
    pub fn save(&self, path: &Path, format: OutputFormat, quality: u8) -> Result<()> {
        image::save_image(&self.image, path, format, quality)
    }
}

impl Drop for TileHandle<'_> {
    fn drop(&mut self) {
        let live = self.session.live_tiles.get();
        self.session.live_tiles.set(live.saturating_sub(1));
        tracing::debug!("Released tile image '{}'", self.name);
    }
}
