//! Tile pixel extraction.

use crate::error::Result;
use crate::image::{SourceImage, RGBA_CHANNELS};

use super::grid::TileGrid;

/// Fill value for channels the source does not have (opaque alpha).
const MISSING_CHANNEL: f32 = 1.0;

/// Copy one tile out of a source image.
///
/// The result is `tile_w * tile_h * 4` values in the same bottom-up row
/// order as the source. Channels missing from the source are set to 1.0.
///
/// # Errors
///
/// Returns an error if `index` is outside the grid.
pub fn extract_tile(source: &SourceImage, grid: &TileGrid, index: u32) -> Result<Vec<f32>> {
    let (base_x, base_y) = grid.origin(index)?;
    let (tile_w, tile_h) = grid.tile_size();

    let width = source.width() as usize;
    let src_channels = source.channels();
    let src = source.pixels();

    let mut tile = vec![0.0_f32; tile_w as usize * tile_h as usize * RGBA_CHANNELS];

    for local_y in 0..tile_h as usize {
        let global_y = base_y as usize + local_y;
        for local_x in 0..tile_w as usize {
            let global_x = base_x as usize + local_x;

            let src_idx = (global_y * width + global_x) * src_channels;
            let dst_idx = (local_y * tile_w as usize + local_x) * RGBA_CHANNELS;

            for c in 0..RGBA_CHANNELS {
                tile[dst_idx + c] = if c < src_channels {
                    src[src_idx + c]
                } else {
                    MISSING_CHANNEL
                };
            }
        }
    }

    Ok(tile)
}
