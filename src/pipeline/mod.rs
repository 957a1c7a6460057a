//! Tiling pipeline: grid validation, tile extraction, and LOD output.

mod extract;
mod grid;
mod layout;
mod lod;
mod split;

pub use extract::extract_tile;
pub use grid::TileGrid;
pub use layout::OutputLayout;
pub use lod::{LodTier, LodWriter, ResizeMode};
pub use split::{Config, SplitReport, Splitter, TileOutput};
