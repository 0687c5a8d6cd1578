use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use quilt_grid::GlobalField;
use quilt_io::{SnapshotFormat, assemble_global, list_available_steps};
use tracing::info;

use crate::cli::ExportArgs;
use crate::config::QuiltConfig;

/// Assemble one or more steps and write the global field to a file.
pub fn run(args: ExportArgs) -> Result<()> {
    let config = QuiltConfig::load(args.config.as_deref())?;
    let dir = args.dir.unwrap_or(config.io.dir);
    let format: SnapshotFormat = args.format.as_deref().unwrap_or(&config.io.format).parse()?;
    let var = args.var.unwrap_or(config.io.var);

    let available = list_available_steps(&dir, format)
        .with_context(|| format!("failed to list steps in {}", dir.display()))?;
    if available.is_empty() {
        bail!(
            "no .{} snapshots in {}/snapshots",
            format.extension(),
            dir.display()
        );
    }

    let selected: Vec<u32> = match (&args.steps, args.step) {
        (Some(spec), _) => parse_steps_arg(spec, &available)?,
        (None, Some(step)) => vec![step],
        // Default: latest available step.
        (None, None) => vec![available[available.len() - 1]],
    };
    if selected.is_empty() {
        bail!("step selection '{}' matches no available step", args.steps.unwrap_or_default());
    }

    let many = selected.len() > 1;
    for step in selected {
        let field = assemble_global(&dir, step, format, &var)
            .with_context(|| format!("failed to assemble step {step}"))?;
        let output = if many {
            suffixed_output(&args.output, step)
        } else {
            args.output.clone()
        };
        write_field(&field, &output, &var)?;
        info!(step, output = %output.display(), "exported global field");
    }
    Ok(())
}

/// Parse a step selection: `a-b` (inclusive, either end open) filters the
/// available steps; `i,j,k` is an explicit list.
fn parse_steps_arg(spec: &str, available: &[u32]) -> Result<Vec<u32>> {
    let s = spec.trim();
    if let Some((a, b)) = s.split_once('-') {
        let lo: u32 = if a.is_empty() {
            available.first().copied().unwrap_or(0)
        } else {
            a.parse().with_context(|| format!("bad range start '{a}'"))?
        };
        let hi: u32 = if b.is_empty() {
            available.last().copied().unwrap_or(lo)
        } else {
            b.parse().with_context(|| format!("bad range end '{b}'"))?
        };
        return Ok(available.iter().copied().filter(|&k| lo <= k && k <= hi).collect());
    }
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse()
                .with_context(|| format!("bad step '{}'", part.trim()))
        })
        .collect()
}

/// `out.csv` + step 3 -> `out_00003.csv`.
fn suffixed_output(output: &Path, step: u32) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("field");
    let name = match output.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{step:05}.{ext}"),
        None => format!("{stem}_{step:05}"),
    };
    output.with_file_name(name)
}

/// Write the field to `output`; a `.nc` extension selects NetCDF, anything
/// else comma-delimited text.
fn write_field(field: &GlobalField, output: &Path, var: &str) -> Result<()> {
    if output.extension().and_then(|e| e.to_str()) == Some("nc") {
        write_netcdf(field, output, var)
    } else {
        write_csv(field, output)
    }
}

fn write_csv(field: &GlobalField, output: &Path) -> Result<()> {
    let mut out = String::new();
    for row in field.rows() {
        let line: Vec<String> = row.iter().map(f64::to_string).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    std::fs::write(output, out)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

#[cfg(feature = "netcdf")]
fn write_netcdf(field: &GlobalField, output: &Path, var: &str) -> Result<()> {
    let (ny, nx) = field.shape();
    let mut file = netcdf_create(output)?;
    file.add_dimension("y", ny)
        .with_context(|| format!("failed to define dimensions in {}", output.display()))?;
    file.add_dimension("x", nx)
        .with_context(|| format!("failed to define dimensions in {}", output.display()))?;
    let mut v = file
        .add_variable::<f64>(var, &["y", "x"])
        .with_context(|| format!("failed to define variable '{var}' in {}", output.display()))?;
    v.put_values(field.as_slice(), ..)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

#[cfg(feature = "netcdf")]
fn netcdf_create(output: &Path) -> Result<netcdf::FileMut> {
    netcdf::create(output).with_context(|| format!("failed to create {}", output.display()))
}

#[cfg(not(feature = "netcdf"))]
fn write_netcdf(_field: &GlobalField, _output: &Path, _var: &str) -> Result<()> {
    bail!("netcdf support not available: rebuild quilt with the 'netcdf' feature")
}
