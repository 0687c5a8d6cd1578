//! Per-step assembly of rank tiles into one global field.

use std::path::Path;

use quilt_grid::{GlobalField, place_tile};
use tracing::{debug, info};

use crate::csv_tile::read_csv_tile;
use crate::discover::snapshot_files;
use crate::error::IoError;
use crate::format::SnapshotFormat;
use crate::layout_read::read_layout;
use crate::netcdf_tile::read_netcdf_tile;

/// Name of the rank layout descriptor inside the base output directory.
pub const LAYOUT_FILE: &str = "rank_layout.csv";

/// Assemble the global field for one step of a dataset.
///
/// This is the single entry point presentation code uses to obtain a field:
/// it loads and validates the rank layout, allocates a zero-filled global
/// array, discovers the step's snapshot files, and reads and places every
/// declared tile in layout order. `var` names the NetCDF variable to read
/// and is ignored for CSV tiles.
///
/// Any failure aborts the whole call; a partially assembled field is never
/// returned.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] / [`IoError::MalformedLayout`] /
/// [`IoError::Grid`] from layout loading, [`IoError::SnapshotDirNotFound`] /
/// [`IoError::NoSnapshots`] from discovery, [`IoError::MissingTile`] when a
/// declared rank has no file at this step, and the tile readers' own errors
/// (including [`quilt_grid::GridError::ShapeMismatch`] via [`IoError::Grid`]
/// when content matches neither admissible geometry).
pub fn assemble_global(
    base: &Path,
    step: u32,
    format: SnapshotFormat,
    var: &str,
) -> Result<GlobalField, IoError> {
    let layout = read_layout(&base.join(LAYOUT_FILE))?;
    let (nyg, nxg) = layout.global_shape();
    let mut field = GlobalField::zeros(nyg, nxg);

    let files = snapshot_files(base, step, format)?;

    for tile in layout.tiles() {
        let path = files.get(&tile.rank).ok_or(IoError::MissingTile {
            rank: tile.rank,
            step,
            ext: format.extension(),
        })?;

        let data = match format {
            SnapshotFormat::Csv => read_csv_tile(path)?,
            SnapshotFormat::Netcdf => read_netcdf_tile(path, var)?,
        };
        debug!(rank = tile.rank, step, shape = ?data.shape(), "placing tile");
        place_tile(&mut field, &data, tile)?;
    }

    info!(step, ny = nyg, nx = nxg, n_tiles = layout.len(), "assembled global field");
    Ok(field)
}
