//! # quilt-io
//!
//! Reads the on-disk output of a rank-partitioned simulation — a
//! `rank_layout.csv` descriptor plus per-step, per-rank snapshot tiles in CSV
//! or NetCDF — and stitches the tiles into one [`quilt_grid::GlobalField`].
//!
//! The dataset directory is treated as read-only and possibly still growing:
//! every call discovers files fresh, and a missing step or rank always
//! surfaces as an error rather than a partially assembled field.

mod assemble;
mod csv_tile;
mod discover;
mod error;
mod format;
mod layout_read;
mod metadata;
mod netcdf_tile;

pub use assemble::{LAYOUT_FILE, assemble_global};
pub use discover::{list_available_steps, snapshot_files};
pub use error::IoError;
pub use format::SnapshotFormat;
pub use layout_read::read_layout;
pub use metadata::load_metadata;
