#![cfg(not(feature = "netcdf"))]

//! Behavior of the NetCDF entry points when support is compiled out: they
//! must surface the capability error, not pretend the files are malformed.

use std::fs;
use std::path::Path;

use quilt_io::{IoError, LAYOUT_FILE, SnapshotFormat, assemble_global, load_metadata};
use tempfile::TempDir;

struct Dataset {
    dir: TempDir,
}

impl Dataset {
    fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        fs::write(
            dir.path().join(LAYOUT_FILE),
            "rank,x_off,y_off,nx,ny,halo,nxg,nyg\n0,0,0,4,4,1,4,4\n",
        )
        .expect("write layout");
        fs::create_dir(dir.path().join("snapshots")).expect("mkdir snapshots");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Drops a placeholder `.nc` snapshot; its content is never opened.
    fn touch_snapshot(&self, step: u32, rank: u32) {
        let name = format!("snapshot_{step:05}_rank{rank:05}.nc");
        fs::write(self.dir.path().join("snapshots").join(name), b"not netcdf")
            .expect("write snapshot");
    }
}

#[test]
fn assemble_reports_capability_not_file_error() {
    let ds = Dataset::new();
    ds.touch_snapshot(0, 0);

    let err = assemble_global(ds.path(), 0, SnapshotFormat::Netcdf, "u").unwrap_err();
    assert!(matches!(err, IoError::NetcdfUnavailable), "got {err:?}");
}

#[test]
fn metadata_reports_capability_error() {
    let ds = Dataset::new();
    ds.touch_snapshot(0, 0);

    let err = load_metadata(ds.path()).unwrap_err();
    assert!(matches!(err, IoError::NetcdfUnavailable), "got {err:?}");
}

#[test]
fn csv_assembly_still_works_without_netcdf() {
    let ds = Dataset::new();
    let name = "snapshot_00000_rank00000.csv";
    let rows: Vec<String> = (0..6)
        .map(|_| vec!["1.5"; 6].join(","))
        .collect();
    fs::write(
        ds.path().join("snapshots").join(name),
        rows.join("\n"),
    )
    .expect("write csv tile");

    let field = assemble_global(ds.path(), 0, SnapshotFormat::Csv, "u").expect("assemble");
    assert_eq!(field.shape(), (4, 4));
    assert!(field.as_slice().iter().all(|&v| v == 1.5));
}
