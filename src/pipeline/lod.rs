//! Level-of-detail tiers and the writer that produces them.

use std::path::PathBuf;

use crate::error::Result;
use crate::image::{self, OutputFormat, ResizeFilter};
use crate::session::TileHandle;

use super::layout::OutputLayout;

/// One resolution tier of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LodTier {
    /// Native tile resolution.
    Lod02,
    /// Medium size.
    Lod01,
    /// Small size.
    Lod00,
}

impl LodTier {
    /// Tiers in write order: native first, smallest last.
    pub const ALL: [Self; 3] = [Self::Lod02, Self::Lod01, Self::Lod00];

    /// File name without extension.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Lod02 => "LOD_02",
            Self::Lod01 => "LOD_01",
            Self::Lod00 => "LOD_00",
        }
    }
}

/// How the smaller tiers are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Resample every tier from the native tile.
    #[default]
    Independent,
    /// Resample each tier from the previous one, in place.
    Cascade,
}

/// Writes the three LOD files of a tile.
#[derive(Debug, Clone)]
pub struct LodWriter {
    pub format: OutputFormat,
    pub quality: u8,
    pub filter: ResizeFilter,
    pub mode: ResizeMode,
    pub lod01_size: u32,
    pub lod00_size: u32,
}

impl LodWriter {
    /// Target `(width, height)` of a tier for a tile of `native` size.
    #[must_use]
    pub const fn tier_size(&self, tier: LodTier, native: (u32, u32)) -> (u32, u32) {
        match tier {
            LodTier::Lod02 => native,
            LodTier::Lod01 => (self.lod01_size, self.lod01_size),
            LodTier::Lod00 => (self.lod00_size, self.lod00_size),
        }
    }

    /// Write every tier of `tile` into its variant folder.
    ///
    /// In [`ResizeMode::Cascade`] the tile is left at the smallest size.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written. Files already written
    /// for this tile stay on disk.
    pub fn write(
        &self,
        tile: &mut TileHandle<'_>,
        index: u32,
        layout: &OutputLayout,
    ) -> Result<Vec<PathBuf>> {
        let native = tile.dimensions();
        let mut written = Vec::with_capacity(LodTier::ALL.len());

        for tier in LodTier::ALL {
            let (width, height) = self.tier_size(tier, native);
            let path = layout.lod_path(index, tier);

            match (tier, self.mode) {
                (LodTier::Lod02, _) => tile.save(&path, self.format, self.quality)?,
                (_, ResizeMode::Cascade) => {
                    tile.scale(width, height, self.filter);
                    tile.save(&path, self.format, self.quality)?;
                }
                (_, ResizeMode::Independent) => {
                    let scaled = image::scale_image(tile.image(), width, height, self.filter);
                    image::save_image(&scaled, &path, self.format, self.quality)?;
                }
            }

            tracing::info!(
                "Tile {index:02} {} saved: {}",
                tier.file_stem(),
                path.display()
            );
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use ::image::GenericImageView;

    fn writer(mode: ResizeMode) -> LodWriter {
        LodWriter {
            format: OutputFormat::Png,
            quality: 95,
            filter: ResizeFilter::Triangle,
            mode,
            lod01_size: 8,
            lod00_size: 2,
        }
    }

    fn check_mode(mode: ResizeMode) {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "P", "V", OutputFormat::Png);
        layout.ensure_tile_dirs(0).unwrap();

        let session = Session::default();
        let pixels = vec![0.5_f32; 16 * 16 * 4];
        let mut tile = session.acquire_tile("t", 16, 16, &pixels).unwrap();

        let files = writer(mode).write(&mut tile, 0, &layout).unwrap();
        assert_eq!(files.len(), 3);

        let sizes: Vec<_> = files
            .iter()
            .map(|p| ::image::open(p).unwrap().dimensions())
            .collect();
        assert_eq!(sizes, vec![(16, 16), (8, 8), (2, 2)]);
        assert!(files[0].ends_with("P_01/V/LOD_02.png"));
        assert!(files[2].ends_with("P_01/V/LOD_00.png"));
    }

    #[test]
    fn test_independent_mode_sizes() {
        check_mode(ResizeMode::Independent);
    }

    #[test]
    fn test_cascade_mode_sizes() {
        check_mode(ResizeMode::Cascade);
    }

    #[test]
    fn test_independent_keeps_native_tile() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "P", "V", OutputFormat::Png);
        layout.ensure_tile_dirs(0).unwrap();

        let session = Session::default();
        let mut tile = session
            .acquire_tile("t", 4, 4, &[1.0_f32; 4 * 4 * 4])
            .unwrap();

        writer(ResizeMode::Independent)
            .write(&mut tile, 0, &layout)
            .unwrap();
        assert_eq!(tile.dimensions(), (4, 4));

        writer(ResizeMode::Cascade)
            .write(&mut tile, 0, &layout)
            .unwrap();
        assert_eq!(tile.dimensions(), (2, 2));
    }

    #[test]
    fn test_stems() {
        let stems: Vec<_> = LodTier::ALL.iter().map(|t| t.file_stem()).collect();
        assert_eq!(stems, ["LOD_02", "LOD_01", "LOD_00"]);
    }
}
