//! Error types for quilt-io.

use std::path::PathBuf;

use quilt_grid::GridError;

/// Error type for all fallible operations in the quilt-io crate.
///
/// This enum covers missing resources (files, directories, steps, ranks),
/// malformed descriptor and tile content, NetCDF-specific failures, and the
/// capability error raised when NetCDF support is compiled out. Geometry
/// violations surface transparently as [`GridError`].
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when the `snapshots/` subdirectory does not exist.
    #[error("snapshot directory not found: {}", path.display())]
    SnapshotDirNotFound {
        /// Directory that was expected.
        path: PathBuf,
    },

    /// Returned when the snapshot directory exists but holds no files for a step.
    #[error("no snapshots for step {step} in {} (*.{ext})", dir.display())]
    NoSnapshots {
        /// Requested step index.
        step: u32,
        /// Snapshot directory that was searched.
        dir: PathBuf,
        /// Extension that was matched against.
        ext: &'static str,
    },

    /// Returned when a step has snapshots but one declared rank's file is absent.
    #[error("missing .{ext} tile for rank {rank} at step {step}")]
    MissingTile {
        /// Rank whose file is missing.
        rank: u32,
        /// Step being assembled.
        step: u32,
        /// Extension of the expected file.
        ext: &'static str,
    },

    /// Returned when two snapshot files resolve to the same rank for one step.
    #[error(
        "duplicate snapshot for rank {rank} at step {step}: {} and {}",
        first.display(), second.display()
    )]
    DuplicateSnapshot {
        /// Rank claimed by both files.
        rank: u32,
        /// Step being discovered.
        step: u32,
        /// Lexically earlier path.
        first: PathBuf,
        /// Lexically later path.
        second: PathBuf,
    },

    /// Returned when the rank layout descriptor yields no usable rows or a
    /// row that does not parse as eight integers.
    #[error("malformed rank layout {}: {reason}", path.display())]
    MalformedLayout {
        /// Path to the descriptor.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// Returned when tile content is not a rectangular 2D numeric table.
    #[error("malformed tile {}: {reason}", path.display())]
    MalformedTile {
        /// Path to the tile file.
        path: PathBuf,
        /// Description of the content problem.
        reason: String,
    },

    /// Returned when a required variable is not present in a NetCDF file.
    #[error(
        "variable '{name}' not found in {}; available: {}",
        path.display(), available.join(", ")
    )]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
        /// Variable names the file actually contains.
        available: Vec<String>,
    },

    /// Returned when a format tag string is not a recognized snapshot format.
    #[error("unknown snapshot format '{value}' (expected 'csv' or 'nc')")]
    UnknownFormat {
        /// The unrecognized tag.
        value: String,
    },

    /// Wraps an unexpected operating-system I/O failure.
    #[error("i/o error at {}: {reason}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a NetCDF operation is requested but support was
    /// compiled out. Distinct from a malformed-file error.
    #[error("netcdf support not available: rebuild quilt-io with the 'netcdf' feature")]
    NetcdfUnavailable,

    /// A layout or placement invariant was violated.
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[cfg(feature = "netcdf")]
impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/rank_layout.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/rank_layout.csv");
    }

    #[test]
    fn display_no_snapshots() {
        let err = IoError::NoSnapshots {
            step: 7,
            dir: PathBuf::from("/out/snapshots"),
            ext: "csv",
        };
        assert_eq!(
            err.to_string(),
            "no snapshots for step 7 in /out/snapshots (*.csv)"
        );
    }

    #[test]
    fn display_missing_tile() {
        let err = IoError::MissingTile {
            rank: 2,
            step: 10,
            ext: "nc",
        };
        assert_eq!(err.to_string(), "missing .nc tile for rank 2 at step 10");
    }

    #[test]
    fn display_missing_variable_lists_available() {
        let err = IoError::MissingVariable {
            name: "u".to_string(),
            path: PathBuf::from("/out/snapshots/snapshot_00000_rank00000.nc"),
            available: vec!["temperature".to_string(), "x".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "variable 'u' not found in /out/snapshots/snapshot_00000_rank00000.nc; \
             available: temperature, x"
        );
    }

    #[test]
    fn display_unknown_format() {
        let err = IoError::UnknownFormat {
            value: "hdf5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown snapshot format 'hdf5' (expected 'csv' or 'nc')"
        );
    }

    #[test]
    fn grid_error_is_transparent() {
        let err: IoError = GridError::EmptyLayout.into();
        assert_eq!(err.to_string(), "layout contains no tiles");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
