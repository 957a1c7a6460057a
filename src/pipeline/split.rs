//! Main tiling pipeline.

use std::path::{Component, Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};
use crate::image::{OutputFormat, ResizeFilter};
use crate::session::Session;

use super::extract::extract_tile;
use super::grid::TileGrid;
use super::layout::OutputLayout;
use super::lod::{LodWriter, ResizeMode};

/// Configuration for a tiling run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the source image in the session.
    pub image_name: String,

    /// Tiles per row and per column.
    pub tiles_per_axis: u32,

    /// Top-level output folder, created under the session root.
    pub parent_folder: String,

    /// Folder inside each tile folder that holds the LOD files.
    pub variant_folder: String,

    /// Encoding for every file written.
    pub output_format: OutputFormat,

    /// Side length of the medium tier (`LOD_01`).
    pub lod01_size: u32,

    /// Side length of the small tier (`LOD_00`).
    pub lod00_size: u32,

    /// Output JPEG quality (1-100).
    pub output_quality: u8,

    /// Resampling filter for the smaller tiers.
    pub filter: ResizeFilter,

    /// Whether smaller tiers come from the native tile or the previous tier.
    pub resize_mode: ResizeMode,

    /// Draw a progress bar over the tiles.
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_name: "Ground048_4K-JPG_AmbientOcclusion.jpg".to_string(),
            tiles_per_axis: 4,
            parent_folder: "Ground48".to_string(),
            variant_folder: "AO".to_string(),
            output_format: OutputFormat::Jpeg,
            lod01_size: 512,
            lod00_size: 64,
            output_quality: 95,
            filter: ResizeFilter::default(),
            resize_mode: ResizeMode::default(),
            show_progress: true,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.image_name.is_empty() {
            return Err(invalid("image_name", "must not be empty"));
        }

        if self.tiles_per_axis == 0 {
            return Err(invalid("tiles_per_axis", "must be greater than 0"));
        }

        if !is_folder_name(&self.parent_folder) {
            return Err(invalid("parent_folder", "must be a single folder name"));
        }

        if !is_folder_name(&self.variant_folder) {
            return Err(invalid("variant_folder", "must be a single folder name"));
        }

        if self.lod01_size == 0 {
            return Err(invalid("lod01_size", "must be greater than 0"));
        }

        if self.lod00_size == 0 {
            return Err(invalid("lod00_size", "must be greater than 0"));
        }

        if !(1..=100).contains(&self.output_quality) {
            return Err(invalid("output_quality", "must be between 1 and 100"));
        }

        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> Error {
    Error::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// A name usable as exactly one path component.
fn is_folder_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

/// Files written for one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileOutput {
    /// Zero-based tile index in reading order.
    pub index: u32,
    /// Variant folder holding the LOD files.
    pub dir: PathBuf,
    /// LOD files, native tier first.
    pub files: Vec<PathBuf>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Top-level output folder.
    pub parent_dir: PathBuf,
    /// Native tile `(width, height)`.
    pub tile_size: (u32, u32),
    /// One entry per tile, in reading order.
    pub tiles: Vec<TileOutput>,
}

impl SplitReport {
    /// Total number of files written.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.tiles.iter().map(|t| t.files.len()).sum()
    }
}

/// Splits a session image into LOD tiles.
pub struct Splitter {
    config: Config,
}

impl Splitter {
    /// Create a new splitter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        tracing::debug!("Splitter configured: {config:?}");
        Ok(Self { config })
    }

    /// Split the configured image into tiles and write every LOD tier.
    ///
    /// Dimensions are checked before anything touches the filesystem. Once
    /// writing starts, a failure leaves earlier tiles on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is missing, the session has no root,
    /// the dimensions do not fit the grid, or a write fails.
    pub fn split(&self, session: &Session) -> Result<SplitReport> {
        let config = &self.config;

        let image = session.image(&config.image_name)?;
        let root = session.root()?;
        tracing::info!("Root directory: {}", root.display());

        let (width, height) = image.dimensions();
        let grid = TileGrid::new(width, height, config.tiles_per_axis)?;
        let (tile_w, tile_h) = grid.tile_size();

        tracing::info!("Image '{}' size: {width}x{height}", image.name());
        tracing::info!(
            "Tile size: {tile_w}x{tile_h}, tiles per axis: {}",
            grid.tiles_per_axis()
        );

        let layout = OutputLayout::new(
            root,
            config.parent_folder.as_str(),
            config.variant_folder.as_str(),
            config.output_format,
        );
        let parent_dir = layout.ensure_parent_dir()?.to_path_buf();
        tracing::info!("Parent folder: {}", parent_dir.display());

        let writer = LodWriter {
            format: config.output_format,
            quality: config.output_quality,
            filter: config.filter,
            mode: config.resize_mode,
            lod01_size: config.lod01_size,
            lod00_size: config.lod00_size,
        };

        let pb = self.progress_bar(grid.tile_count());
        let mut tiles = Vec::with_capacity(grid.tile_count() as usize);

        for index in 0..grid.tile_count() {
            let dir = layout.ensure_tile_dirs(index)?;
            let pixels = extract_tile(image, &grid, index)?;

            let mut tile = session.acquire_tile(
                format!("{}_tile_{index:02}", image.name()),
                tile_w,
                tile_h,
                &pixels,
            )?;
            let files = writer.write(&mut tile, index, &layout)?;
            drop(tile);

            tiles.push(TileOutput { index, dir, files });
            pb.inc(1);
        }

        pb.finish_with_message("Tiling complete");
        tracing::info!("All tiles and LODs generated successfully");

        Ok(SplitReport {
            parent_dir,
            tile_size: (tile_w, tile_h),
            tiles,
        })
    }

    fn progress_bar(&self, len: u32) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(u64::from(len));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Tiles [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("valid template")
                .progress_chars("#>-"),
        );
        pb
    }
}
