//! Whole-dataset metadata from NetCDF global attributes.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::IoError;

/// Read the dataset's descriptive metadata as key-value strings.
///
/// The simulation writer stamps every NetCDF snapshot with the same global
/// attributes (`description`, `grid`, `dt`, `steps`, and friends), so the
/// earliest-step, lowest-rank snapshot is read as the representative source.
///
/// # Errors
///
/// Returns [`IoError::SnapshotDirNotFound`] if `<base>/snapshots` does not
/// exist, [`IoError::NoSnapshots`] if no NetCDF snapshot is present at the
/// earliest step, and [`IoError::NetcdfUnavailable`] when NetCDF support is
/// compiled out. Failures opening the file or reading an attribute surface
/// as [`IoError::Netcdf`].
#[cfg(feature = "netcdf")]
pub fn load_metadata(base: &Path) -> Result<BTreeMap<String, String>, IoError> {
    use crate::discover::{list_available_steps, snapshot_files, snapshots_dir};
    use crate::format::SnapshotFormat;

    let steps = list_available_steps(base, SnapshotFormat::Netcdf)?;
    let Some(&first_step) = steps.first() else {
        return Err(IoError::NoSnapshots {
            step: 0,
            dir: snapshots_dir(base)?,
            ext: SnapshotFormat::Netcdf.extension(),
        });
    };

    let files = snapshot_files(base, first_step, SnapshotFormat::Netcdf)?;
    // BTreeMap iteration gives the lowest rank first.
    let Some((_rank, path)) = files.into_iter().next() else {
        return Err(IoError::NoSnapshots {
            step: first_step,
            dir: snapshots_dir(base)?,
            ext: SnapshotFormat::Netcdf.extension(),
        });
    };

    let file = netcdf::open(&path)?;
    let mut attrs = BTreeMap::new();
    for attr in file.attributes() {
        let value = attribute_to_string(attr.value()?);
        attrs.insert(attr.name().to_string(), value);
    }
    Ok(attrs)
}

#[cfg(not(feature = "netcdf"))]
pub fn load_metadata(_base: &Path) -> Result<BTreeMap<String, String>, IoError> {
    Err(IoError::NetcdfUnavailable)
}

/// Render a NetCDF attribute value as a display string.
#[cfg(feature = "netcdf")]
fn attribute_to_string(value: netcdf::AttributeValue) -> String {
    use netcdf::AttributeValue;
    match value {
        AttributeValue::Str(s) => s,
        AttributeValue::Double(v) => v.to_string(),
        AttributeValue::Float(v) => v.to_string(),
        AttributeValue::Int(v) => v.to_string(),
        AttributeValue::Uint(v) => v.to_string(),
        AttributeValue::Longlong(v) => v.to_string(),
        AttributeValue::Ulonglong(v) => v.to_string(),
        AttributeValue::Short(v) => v.to_string(),
        AttributeValue::Ushort(v) => v.to_string(),
        AttributeValue::Schar(v) => v.to_string(),
        AttributeValue::Uchar(v) => v.to_string(),
        other => format!("{other:?}"),
    }
}
