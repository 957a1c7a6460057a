//! Tile grid validation and coordinate mapping.

use crate::error::{Error, Result};

/// A validated NxN split of a square image.
///
/// Tiles are indexed in reading order from the top-left:
///
/// ```text
/// 00 01 02 03
/// 04 05 06 07
/// 08 09 10 11
/// 12 13 14 15
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    image_size: u32,
    tiles_per_axis: u32,
}

impl TileGrid {
    /// Validate image dimensions against the tile count.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not square, if either side is not a
    /// multiple of `tiles_per_axis`, if the image is empty, or if
    /// `tiles_per_axis` is zero or too large to number every tile.
    pub fn new(width: u32, height: u32, tiles_per_axis: u32) -> Result<Self> {
        if tiles_per_axis == 0 {
            return Err(Error::InvalidParameter {
                name: "tiles_per_axis".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if tiles_per_axis.checked_mul(tiles_per_axis).is_none() {
            return Err(Error::InvalidParameter {
                name: "tiles_per_axis".to_string(),
                reason: format!("{tiles_per_axis} squared does not fit a tile index"),
            });
        }

        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter {
                name: "image size".to_string(),
                reason: format!("{width}x{height} has no pixels"),
            });
        }

        if width != height {
            return Err(Error::NotSquare { width, height });
        }

        if width % tiles_per_axis != 0 || height % tiles_per_axis != 0 {
            return Err(Error::NotDivisible {
                width,
                height,
                tiles: tiles_per_axis,
            });
        }

        Ok(Self {
            image_size: width,
            tiles_per_axis,
        })
    }

    /// Tiles along each side.
    #[must_use]
    pub const fn tiles_per_axis(&self) -> u32 {
        self.tiles_per_axis
    }

    /// Tile `(width, height)` in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> (u32, u32) {
        let side = self.image_size / self.tiles_per_axis;
        (side, side)
    }

    /// Total number of tiles, `N * N`.
    #[must_use]
    pub const fn tile_count(&self) -> u32 {
        self.tiles_per_axis * self.tiles_per_axis
    }

    /// Top-down `(row, col)` of a tile. Row 0 is the top row.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not below [`Self::tile_count`].
    pub fn row_col(&self, index: u32) -> Result<(u32, u32)> {
        if index >= self.tile_count() {
            return Err(Error::TileIndexOutOfRange {
                index,
                count: self.tile_count(),
            });
        }
        Ok((index / self.tiles_per_axis, index % self.tiles_per_axis))
    }

    /// Bottom-left pixel of a tile in bottom-up source coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn origin(&self, index: u32) -> Result<(u32, u32)> {
        let (row, col) = self.row_col(index)?;
        let (tile_w, tile_h) = self.tile_size();
        Ok((col * tile_w, (self.tiles_per_axis - 1 - row) * tile_h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_square() {
        let err = TileGrid::new(1024, 512, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::NotSquare {
                width: 1024,
                height: 512
            }
        ));
    }

    #[test]
    fn test_rejects_indivisible() {
        let err = TileGrid::new(1000, 1000, 3).unwrap_err();
        assert!(matches!(err, Error::NotDivisible { tiles: 3, .. }));
    }

    #[test]
    fn test_rejects_zero_tiles() {
        assert!(matches!(
            TileGrid::new(64, 64, 0),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_image() {
        assert!(matches!(
            TileGrid::new(0, 0, 4),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rejects_tile_count_overflow() {
        assert!(matches!(
            TileGrid::new(0, 0, 70_000),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            TileGrid::new(140_000, 140_000, 70_000),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_tile_size_and_count() {
        let grid = TileGrid::new(4096, 4096, 4).unwrap();
        assert_eq!(grid.tile_size(), (1024, 1024));
        assert_eq!(grid.tile_count(), 16);
    }

    #[test]
    fn test_reading_order() {
        let grid = TileGrid::new(400, 400, 4).unwrap();
        assert_eq!(grid.row_col(0).unwrap(), (0, 0));
        assert_eq!(grid.row_col(3).unwrap(), (0, 3));
        assert_eq!(grid.row_col(4).unwrap(), (1, 0));
        assert_eq!(grid.row_col(15).unwrap(), (3, 3));
    }

    #[test]
    fn test_origin_inverts_rows() {
        let grid = TileGrid::new(400, 400, 4).unwrap();
        // top-left tile sits at the top of bottom-up storage
        assert_eq!(grid.origin(0).unwrap(), (0, 300));
        assert_eq!(grid.origin(6).unwrap(), (200, 200));
        // bottom-right tile starts at the storage origin row
        assert_eq!(grid.origin(15).unwrap(), (300, 0));
    }

    #[test]
    fn test_index_out_of_range() {
        let grid = TileGrid::new(8, 8, 2).unwrap();
        assert!(matches!(
            grid.origin(4),
            Err(Error::TileIndexOutOfRange { index: 4, count: 4 })
        ));
    }

    #[test]
    fn test_single_tile_grid() {
        let grid = TileGrid::new(7, 7, 1).unwrap();
        assert_eq!(grid.tile_count(), 1);
        assert_eq!(grid.origin(0).unwrap(), (0, 0));
    }
}
