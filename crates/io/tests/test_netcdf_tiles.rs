//! Integration tests: NetCDF tile assembly and dataset metadata.
#![cfg(feature = "netcdf")]

use std::fmt::Write as _;
use std::path::Path;

use quilt_grid::RankTile;
use quilt_io::{IoError, SnapshotFormat, assemble_global, load_metadata};
use tempfile::{TempDir, tempdir};

/// Synthetic value at global coordinate `(y, x)`.
fn value(y: usize, x: usize) -> f64 {
    (1000 * y + x) as f64
}

/// Two halves of a 6x4 global grid, halo 1.
fn half_tiles() -> Vec<RankTile> {
    let t = |rank, x_off| RankTile {
        rank,
        x_off,
        y_off: 0,
        nx: 3,
        ny: 4,
        halo: 1,
        nxg: 6,
        nyg: 4,
    };
    vec![t(0, 0), t(1, 3)]
}

struct Dataset {
    base: TempDir,
}

impl Dataset {
    fn new(tiles: &[RankTile]) -> Self {
        let base = tempdir().expect("create temp dir");
        let mut layout = String::from("rank,x_off,y_off,nx,ny,halo,nxg,nyg\n");
        for t in tiles {
            writeln!(
                layout,
                "{},{},{},{},{},{},{},{}",
                t.rank, t.x_off, t.y_off, t.nx, t.ny, t.halo, t.nxg, t.nyg
            )
            .expect("format layout row");
        }
        std::fs::write(base.path().join("rank_layout.csv"), layout).expect("write layout");
        std::fs::create_dir(base.path().join("snapshots")).expect("create snapshots dir");
        Self { base }
    }

    fn path(&self) -> &Path {
        self.base.path()
    }

    fn tile_path(&self, step: u32, rank: u32) -> std::path::PathBuf {
        self.base
            .path()
            .join("snapshots")
            .join(format!("snapshot_{step:05}_rank{rank:05}.nc"))
    }

    /// Write one haloed tile as a NetCDF file holding variable `var_name`,
    /// halo cells filled with -999.
    fn write_tile(&self, step: u32, t: &RankTile, var_name: &str) {
        let ny = t.ny + 2 * t.halo;
        let nx = t.nx + 2 * t.halo;
        let mut data = vec![-999.0; ny * nx];
        for r in t.halo..t.ny + t.halo {
            for c in t.halo..t.nx + t.halo {
                data[r * nx + c] = value(t.y_off + r - t.halo, t.x_off + c - t.halo);
            }
        }

        let path = self.tile_path(step, t.rank);
        let mut file = netcdf::create(&path).expect("create NetCDF file");
        file.add_dimension("y", ny).expect("add dim y");
        file.add_dimension("x", nx).expect("add dim x");
        file.add_attribute("description", "climate-sim-mpi-cpp")
            .expect("add description attribute");
        file.add_attribute("grid", format!("{} x {}", t.nxg, t.nyg))
            .expect("add grid attribute");
        file.add_attribute("dt", 0.01).expect("add dt attribute");

        let mut var = file
            .add_variable::<f64>(var_name, &["y", "x"])
            .expect("add tile variable");
        var.put_values(&data, ..).expect("put tile values");
    }

    fn write_step(&self, step: u32, tiles: &[RankTile], var_name: &str) {
        for t in tiles {
            self.write_tile(step, t, var_name);
        }
    }
}

#[test]
fn haloed_netcdf_tiles_assemble() {
    let tiles = half_tiles();
    let ds = Dataset::new(&tiles);
    ds.write_step(0, &tiles, "u");

    let field = assemble_global(ds.path(), 0, SnapshotFormat::Netcdf, "u").expect("assemble");
    assert_eq!(field.shape(), (4, 6));
    for y in 0..4 {
        for x in 0..6 {
            assert_eq!(field.get(y, x), value(y, x), "mismatch at ({y}, {x})");
        }
    }
}

#[test]
fn missing_variable_lists_available_names() {
    let tiles = half_tiles();
    let ds = Dataset::new(&tiles);
    ds.write_step(0, &tiles, "temperature");

    let err = assemble_global(ds.path(), 0, SnapshotFormat::Netcdf, "u").unwrap_err();
    match err {
        IoError::MissingVariable { name, available, .. } => {
            assert_eq!(name, "u");
            assert_eq!(available, vec!["temperature".to_string()]);
        }
        other => panic!("expected MissingVariable, got {other}"),
    }
}

#[test]
fn non_2d_variable_is_malformed() {
    let tiles = half_tiles();
    let ds = Dataset::new(&tiles);
    ds.write_step(0, &tiles, "u");

    // Replace rank 1's tile with a file whose 'u' is 1-D.
    let path = ds.tile_path(0, 1);
    std::fs::remove_file(&path).expect("remove tile");
    let mut file = netcdf::create(&path).expect("recreate tile");
    file.add_dimension("x", 5).expect("add dim x");
    let mut var = file.add_variable::<f64>("u", &["x"]).expect("add 1-D variable");
    var.put_values(&[0.0; 5], ..).expect("put values");
    drop(file);

    let err = assemble_global(ds.path(), 0, SnapshotFormat::Netcdf, "u").unwrap_err();
    assert!(
        matches!(err, IoError::MalformedTile { reason, .. } if reason.contains("1 dimension"))
    );
}

#[test]
fn csv_and_netcdf_datasets_are_independent() {
    let tiles = half_tiles();
    let ds = Dataset::new(&tiles);
    ds.write_step(0, &tiles, "u");

    // No CSV snapshots exist, so the CSV path must fail while NetCDF works.
    let err = assemble_global(ds.path(), 0, SnapshotFormat::Csv, "u").unwrap_err();
    assert!(matches!(err, IoError::NoSnapshots { .. }));
    assemble_global(ds.path(), 0, SnapshotFormat::Netcdf, "u").expect("netcdf assembles");
}

#[test]
fn metadata_read_from_earliest_snapshot() {
    let tiles = half_tiles();
    let ds = Dataset::new(&tiles);
    ds.write_step(3, &tiles, "u");
    ds.write_step(7, &tiles, "u");

    let meta = load_metadata(ds.path()).expect("load metadata");
    assert_eq!(meta.get("description").map(String::as_str), Some("climate-sim-mpi-cpp"));
    assert_eq!(meta.get("grid").map(String::as_str), Some("6 x 4"));
    assert_eq!(meta.get("dt").map(String::as_str), Some("0.01"));
}

#[test]
fn metadata_without_netcdf_snapshots_is_no_snapshots() {
    let tiles = half_tiles();
    let ds = Dataset::new(&tiles);

    let err = load_metadata(ds.path()).unwrap_err();
    assert!(matches!(err, IoError::NoSnapshots { .. }));
}
