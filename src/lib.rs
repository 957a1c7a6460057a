//! # lod-tiler
//!
//! Slice a square texture into an NxN grid of tiles and write three
//! level-of-detail variants of every tile.
//!
//! Output lands in `<root>/<parent>/<parent>_NN/<variant>/` as `LOD_02`
//! (native tile size), `LOD_01` (medium) and `LOD_00` (small). Tiles are
//! numbered in reading order from the top-left, starting at `01`.
//!
//! ## Example
//!
//! ```no_run
//! use lod_tiler::{Config, Session, Splitter};
//!
//! # fn main() -> lod_tiler::Result<()> {
//! let mut session = Session::with_root("textures");
//! let image_name = session.load("textures/Ground048_4K-JPG_AmbientOcclusion.jpg")?;
//!
//! let config = Config {
//!     image_name,
//!     ..Config::default()
//! };
//! let report = Splitter::new(config)?.split(&session)?;
//! println!("wrote {} files", report.file_count());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod pipeline;
pub mod session;

pub use error::{Error, Result};
pub use pipeline::{Config, SplitReport, Splitter};
pub use session::{Session, TileHandle};
