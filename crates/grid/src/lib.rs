//! # quilt-grid
//!
//! Geometry of a rank-partitioned 2D grid and the placement math that stitches
//! per-rank tiles back into one global field. This crate is pure data model:
//! it never touches the filesystem. Reading layout descriptors and snapshot
//! files lives in `quilt-io`.

mod error;
mod field;
mod layout;
mod place;

pub use error::GridError;
pub use field::GlobalField;
pub use layout::{Layout, RankTile};
pub use place::{TileData, place_tile};
