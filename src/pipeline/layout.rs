//! Output directory layout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::image::OutputFormat;

use super::lod::LodTier;

/// Builds paths of the form `root/parent/parent_NN/variant/LOD_xx.ext`.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    parent_dir: PathBuf,
    parent_name: String,
    variant_name: String,
    extension: String,
}

impl OutputLayout {
    /// Create a layout rooted at `root`.
    pub fn new(
        root: &Path,
        parent_name: impl Into<String>,
        variant_name: impl Into<String>,
        format: OutputFormat,
    ) -> Self {
        let parent_name = parent_name.into();
        Self {
            parent_dir: root.join(&parent_name),
            parent_name,
            variant_name: variant_name.into(),
            extension: format.extension(),
        }
    }

    /// `root/parent`.
    #[must_use]
    pub fn parent_dir(&self) -> &Path {
        &self.parent_dir
    }

    /// Folder name of a tile, e.g. `Ground48_01` for index 0.
    #[must_use]
    pub fn tile_folder_name(&self, index: u32) -> String {
        format!("{}_{:02}", self.parent_name, index + 1)
    }

    /// `root/parent/parent_NN`.
    #[must_use]
    pub fn tile_dir(&self, index: u32) -> PathBuf {
        self.parent_dir.join(self.tile_folder_name(index))
    }

    /// `root/parent/parent_NN/variant`.
    #[must_use]
    pub fn variant_dir(&self, index: u32) -> PathBuf {
        self.tile_dir(index).join(&self.variant_name)
    }

    /// Full path of one LOD file.
    #[must_use]
    pub fn lod_path(&self, index: u32, tier: LodTier) -> PathBuf {
        self.variant_dir(index)
            .join(format!("{}{}", tier.file_stem(), self.extension))
    }

    /// Create `root/parent` if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_parent_dir(&self) -> Result<&Path> {
        ensure_dir(&self.parent_dir)?;
        Ok(&self.parent_dir)
    }

    /// Create the tile and variant folders for `index` if missing.
    ///
    /// Returns the variant directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn ensure_tile_dirs(&self, index: u32) -> Result<PathBuf> {
        ensure_dir(&self.tile_dir(index))?;
        let variant_dir = self.variant_dir(index);
        ensure_dir(&variant_dir)?;
        Ok(variant_dir)
    }
}

/// Create a directory and its parents; existing directories are fine.
fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(root: &Path) -> OutputLayout {
        OutputLayout::new(root, "Ground48", "AO", OutputFormat::Jpeg)
    }

    #[test]
    fn test_tile_folders_are_one_based() {
        let layout = layout(Path::new("/proj"));
        assert_eq!(layout.tile_folder_name(0), "Ground48_01");
        assert_eq!(layout.tile_folder_name(15), "Ground48_16");
        assert_eq!(layout.tile_folder_name(99), "Ground48_100");
    }

    #[test]
    fn test_lod_paths() {
        let layout = layout(Path::new("/proj"));
        assert_eq!(
            layout.lod_path(2, LodTier::Lod02),
            PathBuf::from("/proj/Ground48/Ground48_03/AO/LOD_02.jpg")
        );
        assert_eq!(
            layout.lod_path(2, LodTier::Lod00),
            PathBuf::from("/proj/Ground48/Ground48_03/AO/LOD_00.jpg")
        );
    }

    #[test]
    fn test_extension_follows_format() {
        let layout = OutputLayout::new(Path::new("/p"), "P", "V", OutputFormat::Png);
        assert!(layout
            .lod_path(0, LodTier::Lod01)
            .ends_with("P_01/V/LOD_01.png"));
    }

    #[test]
    fn test_ensure_dirs_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());

        layout.ensure_parent_dir().unwrap();
        let first = layout.ensure_tile_dirs(0).unwrap();
        let second = layout.ensure_tile_dirs(0).unwrap();

        assert_eq!(first, second);
        assert!(first.is_dir());
        assert!(dir.path().join("Ground48").join("Ground48_01").is_dir());
    }

    #[test]
    fn test_ensure_dir_over_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Ground48"), b"not a dir").unwrap();

        let err = layout(dir.path()).ensure_parent_dir().unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. }));
    }
}
