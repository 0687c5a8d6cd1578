use anyhow::{Context, Result};
use quilt_io::{SnapshotFormat, list_available_steps};

use crate::cli::StepsArgs;
use crate::config::QuiltConfig;

/// List the snapshot steps available in an output directory.
pub fn run(args: StepsArgs) -> Result<()> {
    let config = QuiltConfig::load(args.config.as_deref())?;
    let dir = args.dir.unwrap_or(config.io.dir);
    let format: SnapshotFormat = args.format.as_deref().unwrap_or(&config.io.format).parse()?;

    let steps = list_available_steps(&dir, format)
        .with_context(|| format!("failed to list steps in {}", dir.display()))?;

    if steps.is_empty() {
        eprintln!("no .{} snapshots in {}/snapshots", format.extension(), dir.display());
        return Ok(());
    }
    for step in steps {
        println!("{step}");
    }
    Ok(())
}
