use std::thread;
use std::time::Duration;

use anyhow::Result;
use quilt_grid::GlobalField;
use quilt_io::{IoError, SnapshotFormat, assemble_global, list_available_steps};
use tracing::warn;

use crate::cli::WatchArgs;
use crate::config::QuiltConfig;

/// Poll an output directory and summarize each new step as it appears.
///
/// A simple last-seen-step state machine: every poll enumerates the available
/// steps, and only a change in the latest step triggers an assembly (unless
/// `--redraw-same` is set). The external writer may be mid-write between
/// polls, so resource-not-found conditions are transient and retried; any
/// other error aborts. Runs until interrupted.
pub fn run(args: WatchArgs) -> Result<()> {
    let config = QuiltConfig::load(args.config.as_deref())?;
    let dir = args.dir.unwrap_or(config.io.dir);
    let format: SnapshotFormat = args.format.as_deref().unwrap_or(&config.io.format).parse()?;
    let var = args.var.unwrap_or(config.io.var);
    let interval = Duration::from_secs_f64(args.interval.unwrap_or(config.watch.interval_secs));
    let redraw_same = args.redraw_same || config.watch.redraw_same;

    let mut last_step: Option<u32> = None;
    loop {
        let steps = match list_available_steps(&dir, format) {
            Ok(steps) => steps,
            // The writer may not have created the directory yet.
            Err(e) if transient(&e) => {
                thread::sleep(interval);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let Some(&step) = steps.last() else {
            thread::sleep(interval);
            continue;
        };
        if Some(step) == last_step && !redraw_same {
            thread::sleep(interval);
            continue;
        }

        match assemble_global(&dir, step, format, &var) {
            Ok(field) => {
                println!("{}", summarize(step, &field));
                last_step = Some(step);
            }
            // The layout or a rank's file may not be flushed yet; retry on
            // the next poll.
            Err(e) if transient(&e) => {
                warn!(step, error = %e, "snapshot set incomplete, retrying");
            }
            Err(e) => return Err(e.into()),
        }

        thread::sleep(interval);
    }
}

/// Whether an error can go away on its own while the external writer is
/// still producing output. Anything else (malformed data, inconsistent
/// layout) will not fix itself and aborts the watch.
fn transient(err: &IoError) -> bool {
    matches!(
        err,
        IoError::FileNotFound { .. }
            | IoError::SnapshotDirNotFound { .. }
            | IoError::NoSnapshots { .. }
            | IoError::MissingTile { .. }
    )
}

/// One-line summary of an assembled field.
fn summarize(step: u32, field: &GlobalField) -> String {
    let (ny, nx) = field.shape();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in field.as_slice() {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    let mean = sum / (ny * nx) as f64;
    format!("step {step}: {nx}x{ny} min={min:.6} max={max:.6} mean={mean:.6}")
}
