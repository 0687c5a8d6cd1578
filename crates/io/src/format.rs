//! Closed set of snapshot encodings.

use std::fmt;
use std::str::FromStr;

use crate::error::IoError;

/// Snapshot tile encoding.
///
/// A closed enum rather than a free-form tag: every dispatch over formats is
/// an exhaustive `match`, so adding an encoding forces each site to handle
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotFormat {
    /// Comma-delimited rectangular text tiles (`.csv`).
    Csv,
    /// Self-describing container tiles with named variables (`.nc`).
    Netcdf,
}

impl SnapshotFormat {
    /// Filename extension used by the snapshot writer, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Csv => "csv",
            SnapshotFormat::Netcdf => "nc",
        }
    }
}

impl FromStr for SnapshotFormat {
    type Err = IoError;

    /// Parse a format tag. Accepts `csv`, `nc`, and `netcdf`.
    fn from_str(s: &str) -> Result<Self, IoError> {
        match s {
            "csv" => Ok(SnapshotFormat::Csv),
            "nc" | "netcdf" => Ok(SnapshotFormat::Netcdf),
            other => Err(IoError::UnknownFormat {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
