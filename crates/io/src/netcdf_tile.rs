//! NetCDF tile reading.
//!
//! Compiled only with the `netcdf` feature; without it every entry point
//! returns [`IoError::NetcdfUnavailable`] so callers can tell a missing
//! capability apart from a malformed file.

use std::path::Path;

use quilt_grid::TileData;

use crate::error::IoError;

/// Read a named 2D `f64` variable from a NetCDF tile file.
///
/// # Errors
///
/// Returns [`IoError::MissingVariable`] (listing the file's variable names)
/// if `var` is absent, [`IoError::MalformedTile`] if the variable is not
/// exactly two-dimensional, and [`IoError::Netcdf`] for library-level
/// failures.
#[cfg(feature = "netcdf")]
pub(crate) fn read_netcdf_tile(path: &Path, var: &str) -> Result<TileData, IoError> {
    let file = netcdf::open(path)?;

    let Some(v) = file.variable(var) else {
        return Err(IoError::MissingVariable {
            name: var.to_string(),
            path: path.to_path_buf(),
            available: file.variables().map(|v| v.name()).collect(),
        });
    };

    let dims = v.dimensions();
    if dims.len() != 2 {
        return Err(IoError::MalformedTile {
            path: path.to_path_buf(),
            reason: format!(
                "variable '{var}' has {} dimension(s), expected 2",
                dims.len()
            ),
        });
    }
    let ny = dims[0].len();
    let nx = dims[1].len();

    let data = v.get_values::<f64, _>(..)?;
    Ok(TileData::new(data, ny, nx)?)
}

#[cfg(not(feature = "netcdf"))]
pub(crate) fn read_netcdf_tile(_path: &Path, _var: &str) -> Result<TileData, IoError> {
    Err(IoError::NetcdfUnavailable)
}
