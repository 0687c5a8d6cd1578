use anyhow::{Context, Result};
use quilt_io::{LAYOUT_FILE, SnapshotFormat, list_available_steps, load_metadata, read_layout};

use crate::cli::InfoArgs;
use crate::config::QuiltConfig;

/// Print layout and dataset metadata for an output directory.
pub fn run(args: InfoArgs) -> Result<()> {
    let config = QuiltConfig::load(args.config.as_deref())?;
    let dir = args.dir.unwrap_or(config.io.dir);
    let format: SnapshotFormat = args.format.as_deref().unwrap_or(&config.io.format).parse()?;

    let layout = read_layout(&dir.join(LAYOUT_FILE))
        .with_context(|| format!("failed to read rank layout in {}", dir.display()))?;
    let (nyg, nxg) = layout.global_shape();
    println!("global grid: {nxg} x {nyg}");
    println!("ranks:       {}", layout.len());
    println!("halo:        {}", layout.halo());

    let steps = list_available_steps(&dir, format)
        .with_context(|| format!("failed to list steps in {}", dir.display()))?;
    match (steps.first(), steps.last()) {
        (Some(first), Some(last)) => {
            println!("steps (.{}): {} ({first}..={last})", format.extension(), steps.len());
        }
        _ => println!("steps (.{}): none", format.extension()),
    }

    // CSV tiles carry no attributes; metadata only exists for NetCDF datasets.
    if format == SnapshotFormat::Netcdf {
        let metadata = load_metadata(&dir)
            .with_context(|| format!("failed to read dataset metadata in {}", dir.display()))?;
        println!("metadata:");
        for (key, value) in &metadata {
            println!("  {key}: {value}");
        }
    }
    Ok(())
}
