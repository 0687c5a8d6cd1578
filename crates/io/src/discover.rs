//! Snapshot file discovery and step enumeration.
//!
//! Snapshots live in `<base>/snapshots` and follow the writer's naming
//! convention `snapshot_{step:05}_rank{rank:05}.{ext}`. Discovery is a
//! point-in-time read of a directory an external writer may still be
//! appending to, so nothing here is cached.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IoError;
use crate::format::SnapshotFormat;

/// Subdirectory of the base output directory that holds snapshot tiles.
const SNAPSHOT_SUBDIR: &str = "snapshots";

/// Width of the zero-padded step and rank fields in snapshot filenames.
const FIELD_WIDTH: usize = 5;

/// Resolve `<base>/snapshots`, requiring it to exist.
pub(crate) fn snapshots_dir(base: &Path) -> Result<PathBuf, IoError> {
    let dir = base.join(SNAPSHOT_SUBDIR);
    if !dir.is_dir() {
        return Err(IoError::SnapshotDirNotFound { path: dir });
    }
    Ok(dir)
}

/// Parse `snapshot_{step:05}_rank{rank:05}.{ext}` into `(step, rank)`.
///
/// The match is strict: exactly five decimal digits per field and exactly the
/// given extension. Anything else is not a snapshot of this format.
pub(crate) fn parse_snapshot_name(name: &str, ext: &str) -> Option<(u32, u32)> {
    let rest = name.strip_prefix("snapshot_")?;
    let step = parse_fixed_decimal(rest.get(..FIELD_WIDTH)?)?;
    let rest = rest.get(FIELD_WIDTH..)?.strip_prefix("_rank")?;
    let rank = parse_fixed_decimal(rest.get(..FIELD_WIDTH)?)?;
    let rest = rest.get(FIELD_WIDTH..)?.strip_prefix('.')?;
    if rest != ext {
        return None;
    }
    Some((step, rank))
}

/// Parse a fixed-width ASCII-decimal field.
fn parse_fixed_decimal(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Sorted snapshot filenames in `dir`.
///
/// Directory iteration order is platform-dependent; sorting keeps duplicate
/// detection and error messages deterministic.
fn sorted_names(dir: &Path) -> Result<Vec<String>, IoError> {
    let entries = std::fs::read_dir(dir).map_err(|e| map_read_dir_err(e, dir))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| map_read_dir_err(e, dir))?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn map_read_dir_err(e: io::Error, dir: &Path) -> IoError {
    if e.kind() == io::ErrorKind::NotFound {
        IoError::SnapshotDirNotFound {
            path: dir.to_path_buf(),
        }
    } else {
        IoError::Io {
            path: dir.to_path_buf(),
            reason: format!("failed to list snapshot directory: {e}"),
        }
    }
}

/// Discover the per-rank snapshot files for one step.
///
/// Returns a map from rank number (parsed out of the filename) to path.
///
/// # Errors
///
/// Returns [`IoError::SnapshotDirNotFound`] if `<base>/snapshots` does not
/// exist, [`IoError::NoSnapshots`] if the directory exists but no file
/// matches the step and format, and [`IoError::DuplicateSnapshot`] if two
/// files resolve to the same rank.
pub fn snapshot_files(
    base: &Path,
    step: u32,
    format: SnapshotFormat,
) -> Result<BTreeMap<u32, PathBuf>, IoError> {
    let dir = snapshots_dir(base)?;
    let ext = format.extension();

    let mut by_rank: BTreeMap<u32, PathBuf> = BTreeMap::new();
    for name in sorted_names(&dir)? {
        let Some((file_step, rank)) = parse_snapshot_name(&name, ext) else {
            continue;
        };
        if file_step != step {
            continue;
        }
        let path = dir.join(&name);
        if let Some(first) = by_rank.get(&rank) {
            return Err(IoError::DuplicateSnapshot {
                rank,
                step,
                first: first.clone(),
                second: path,
            });
        }
        by_rank.insert(rank, path);
    }

    if by_rank.is_empty() {
        return Err(IoError::NoSnapshots { step, dir, ext });
    }

    debug!(step, n_files = by_rank.len(), format = %format, "discovered snapshot files");
    Ok(by_rank)
}

/// Enumerate the distinct step indices present for a format, sorted ascending.
///
/// An existing-but-empty snapshot directory yields an empty `Vec`, not an
/// error; only a missing directory is [`IoError::SnapshotDirNotFound`].
pub fn list_available_steps(base: &Path, format: SnapshotFormat) -> Result<Vec<u32>, IoError> {
    let dir = snapshots_dir(base)?;
    let ext = format.extension();

    let mut steps = BTreeSet::new();
    for name in sorted_names(&dir)? {
        if let Some((step, _rank)) = parse_snapshot_name(&name, ext) {
            steps.insert(step);
        }
    }
    Ok(steps.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_valid_names() {
        assert_eq!(
            parse_snapshot_name("snapshot_00000_rank00000.csv", "csv"),
            Some((0, 0))
        );
        assert_eq!(
            parse_snapshot_name("snapshot_00120_rank00003.nc", "nc"),
            Some((120, 3))
        );
    }

    #[test]
    fn parse_rejects_wrong_extension() {
        assert_eq!(parse_snapshot_name("snapshot_00000_rank00000.csv", "nc"), None);
        assert_eq!(parse_snapshot_name("snapshot_00000_rank00000.nc", "csv"), None);
    }

    #[test]
    fn parse_rejects_wrong_widths() {
        assert_eq!(parse_snapshot_name("snapshot_0000_rank00000.csv", "csv"), None);
        assert_eq!(parse_snapshot_name("snapshot_000000_rank00000.csv", "csv"), None);
        assert_eq!(parse_snapshot_name("snapshot_00000_rank000.csv", "csv"), None);
    }

    #[test]
    fn parse_rejects_non_digits_and_noise() {
        assert_eq!(parse_snapshot_name("snapshot_0a000_rank00000.csv", "csv"), None);
        assert_eq!(parse_snapshot_name("snapshot_00000_rank00000.csv.bak", "csv"), None);
        assert_eq!(parse_snapshot_name("rank_layout.csv", "csv"), None);
        assert_eq!(parse_snapshot_name("snapshot_00000_00000.csv", "csv"), None);
    }

    #[test]
    fn missing_snapshot_dir() {
        let base = tempdir().unwrap();
        let err = list_available_steps(base.path(), SnapshotFormat::Csv).unwrap_err();
        assert!(matches!(err, IoError::SnapshotDirNotFound { .. }));

        let err = snapshot_files(base.path(), 0, SnapshotFormat::Csv).unwrap_err();
        assert!(matches!(err, IoError::SnapshotDirNotFound { .. }));
    }

    #[test]
    fn empty_dir_lists_no_steps_without_error() {
        let base = tempdir().unwrap();
        std::fs::create_dir(base.path().join(SNAPSHOT_SUBDIR)).unwrap();
        let steps = list_available_steps(base.path(), SnapshotFormat::Csv).unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn empty_dir_has_no_snapshots_for_step() {
        let base = tempdir().unwrap();
        std::fs::create_dir(base.path().join(SNAPSHOT_SUBDIR)).unwrap();
        let err = snapshot_files(base.path(), 0, SnapshotFormat::Csv).unwrap_err();
        assert!(matches!(err, IoError::NoSnapshots { step: 0, .. }));
    }

    #[test]
    fn steps_sorted_and_deduplicated_per_format() {
        let base = tempdir().unwrap();
        let snap = base.path().join(SNAPSHOT_SUBDIR);
        std::fs::create_dir(&snap).unwrap();
        for name in [
            "snapshot_00010_rank00000.csv",
            "snapshot_00010_rank00001.csv",
            "snapshot_00000_rank00000.csv",
            "snapshot_00003_rank00000.csv",
            "snapshot_00099_rank00000.nc",
            "notes.txt",
        ] {
            std::fs::write(snap.join(name), b"").unwrap();
        }

        let csv_steps = list_available_steps(base.path(), SnapshotFormat::Csv).unwrap();
        assert_eq!(csv_steps, vec![0, 3, 10]);

        let nc_steps = list_available_steps(base.path(), SnapshotFormat::Netcdf).unwrap();
        assert_eq!(nc_steps, vec![99]);
    }

    #[test]
    fn files_keyed_by_rank() {
        let base = tempdir().unwrap();
        let snap = base.path().join(SNAPSHOT_SUBDIR);
        std::fs::create_dir(&snap).unwrap();
        for name in [
            "snapshot_00002_rank00001.csv",
            "snapshot_00002_rank00000.csv",
            "snapshot_00003_rank00000.csv",
        ] {
            std::fs::write(snap.join(name), b"").unwrap();
        }

        let files = snapshot_files(base.path(), 2, SnapshotFormat::Csv).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[&0].ends_with("snapshot_00002_rank00000.csv"));
        assert!(files[&1].ends_with("snapshot_00002_rank00001.csv"));
    }
}
