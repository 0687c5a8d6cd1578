//! Rank layout descriptor parsing.

use std::path::Path;

use quilt_grid::{Layout, RankTile};
use tracing::debug;

use crate::error::IoError;

/// Number of integer columns in a layout row.
const LAYOUT_COLUMNS: usize = 8;

/// Read and validate a rank layout descriptor.
///
/// The descriptor is CSV with one header row followed by one row per rank,
/// columns in fixed order `rank, x_off, y_off, nx, ny, halo, nxg, nyg`, all
/// integers. Blank lines are tolerated.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::MalformedLayout`] if the file yields zero data rows or a row
/// that does not parse as eight integers, and [`IoError::Grid`] when the
/// parsed tiles violate a layout invariant (conflicting global sizes,
/// duplicate ranks, out-of-bounds tiles). Consistency is checked here, before
/// any snapshot file is touched.
pub fn read_layout(path: &Path) -> Result<Layout, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IoError::MalformedLayout {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut tiles = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IoError::MalformedLayout {
            path: path.to_path_buf(),
            reason: format!("row {}: {e}", i + 2),
        })?;
        // The csv reader already drops fully empty lines; a lone empty field
        // is what a trailing newline with delimiters parses to.
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        tiles.push(parse_row(&record, i + 2, path)?);
    }

    if tiles.is_empty() {
        return Err(IoError::MalformedLayout {
            path: path.to_path_buf(),
            reason: "no data rows".to_string(),
        });
    }

    debug!(path = %path.display(), n_ranks = tiles.len(), "parsed rank layout");
    Ok(Layout::new(tiles)?)
}

/// Parse one descriptor row into a [`RankTile`].
///
/// `line` is the 1-based line number used in error messages (header is line 1).
fn parse_row(record: &csv::StringRecord, line: usize, path: &Path) -> Result<RankTile, IoError> {
    let malformed = |reason: String| IoError::MalformedLayout {
        path: path.to_path_buf(),
        reason,
    };

    if record.len() < LAYOUT_COLUMNS {
        return Err(malformed(format!(
            "row {line}: expected {LAYOUT_COLUMNS} columns, got {}",
            record.len()
        )));
    }

    fn col<T: std::str::FromStr>(
        record: &csv::StringRecord,
        c: usize,
        line: usize,
        malformed: &impl Fn(String) -> IoError,
    ) -> Result<T, IoError> {
        let field = &record[c];
        field.parse::<T>().map_err(|_| {
            malformed(format!(
                "row {line} column {}: '{field}' is not a non-negative integer in range",
                c + 1
            ))
        })
    }

    // The rank column is parsed at its own width so an overflowing value is
    // rejected rather than wrapped.
    Ok(RankTile {
        rank: col::<u32>(record, 0, line, &malformed)?,
        x_off: col::<usize>(record, 1, line, &malformed)?,
        y_off: col::<usize>(record, 2, line, &malformed)?,
        nx: col::<usize>(record, 3, line, &malformed)?,
        ny: col::<usize>(record, 4, line, &malformed)?,
        halo: col::<usize>(record, 5, line, &malformed)?,
        nxg: col::<usize>(record, 6, line, &malformed)?,
        nyg: col::<usize>(record, 7, line, &malformed)?,
    })
}
