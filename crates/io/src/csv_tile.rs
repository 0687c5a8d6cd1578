//! CSV tile reading.

use std::path::Path;

use quilt_grid::TileData;

use crate::error::IoError;

/// Read one tile's raw values from a comma-delimited text file.
///
/// The content must be a rectangular table of floats with at least two rows
/// and two columns; a single row or single column is not genuinely 2D and is
/// rejected rather than guessed at.
///
/// # Errors
///
/// Returns [`IoError::MalformedTile`] for unreadable, empty, ragged,
/// non-numeric, or one-dimensional content.
pub(crate) fn read_csv_tile(path: &Path) -> Result<TileData, IoError> {
    let malformed = |reason: String| IoError::MalformedTile {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| malformed(e.to_string()))?;

    let mut data: Vec<f64> = Vec::new();
    let mut ny = 0usize;
    let mut nx = 0usize;

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| malformed(format!("row {}: {e}", i + 1)))?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        if ny == 0 {
            nx = record.len();
        } else if record.len() != nx {
            return Err(malformed(format!(
                "row {} has {} values, expected {nx}",
                i + 1,
                record.len()
            )));
        }

        for (c, field) in record.iter().enumerate() {
            let v: f64 = field.parse().map_err(|_| {
                malformed(format!("row {} column {}: '{field}' is not a number", i + 1, c + 1))
            })?;
            data.push(v);
        }
        ny += 1;
    }

    if ny == 0 {
        return Err(malformed("empty tile".to_string()));
    }
    if ny < 2 || nx < 2 {
        return Err(malformed(format!("tile is {ny}x{nx}, not two-dimensional")));
    }

    Ok(TileData::new(data, ny, nx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use tempfile::tempdir;

    fn write_tile(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("tile.csv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_rectangular_table() {
        let dir = tempdir().unwrap();
        let path = write_tile(dir.path(), "1.0,2.0,3.0\n4.5,5.5,6.5\n");
        let tile = read_csv_tile(&path).expect("rectangular table");
        assert_eq!(tile.shape(), (2, 3));
    }

    #[test]
    fn tolerates_trailing_blank_line() {
        let dir = tempdir().unwrap();
        let path = write_tile(dir.path(), "1,2\n3,4\n\n");
        let tile = read_csv_tile(&path).expect("blank line tolerated");
        assert_eq!(tile.shape(), (2, 2));
    }

    #[test]
    fn ragged_rows_rejected() {
        let dir = tempdir().unwrap();
        let path = write_tile(dir.path(), "1,2,3\n4,5\n");
        let err = read_csv_tile(&path).unwrap_err();
        assert!(
            matches!(err, IoError::MalformedTile { reason, .. } if reason.contains("expected 3"))
        );
    }

    #[test]
    fn non_numeric_rejected() {
        let dir = tempdir().unwrap();
        let path = write_tile(dir.path(), "1,2\n3,oops\n");
        let err = read_csv_tile(&path).unwrap_err();
        assert!(matches!(err, IoError::MalformedTile { reason, .. } if reason.contains("'oops'")));
    }

    #[test]
    fn empty_file_rejected() {
        let dir = tempdir().unwrap();
        let path = write_tile(dir.path(), "");
        let err = read_csv_tile(&path).unwrap_err();
        assert!(matches!(err, IoError::MalformedTile { reason, .. } if reason == "empty tile"));
    }

    #[test]
    fn single_row_rejected_as_one_dimensional() {
        let dir = tempdir().unwrap();
        let path = write_tile(dir.path(), "1,2,3,4\n");
        let err = read_csv_tile(&path).unwrap_err();
        assert!(
            matches!(err, IoError::MalformedTile { reason, .. } if reason.contains("not two-dimensional"))
        );
    }

    #[test]
    fn single_column_rejected_as_one_dimensional() {
        let dir = tempdir().unwrap();
        let path = write_tile(dir.path(), "1\n2\n3\n");
        let err = read_csv_tile(&path).unwrap_err();
        assert!(
            matches!(err, IoError::MalformedTile { reason, .. } if reason.contains("not two-dimensional"))
        );
    }
}
