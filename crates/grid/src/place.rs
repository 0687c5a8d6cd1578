//! Halo stripping and placement of one tile into the global field.

use crate::error::GridError;
use crate::field::GlobalField;
use crate::layout::RankTile;

// ---------------------------------------------------------------------------
// TileData
// ---------------------------------------------------------------------------

/// Raw 2D content of one snapshot tile, row-major with explicit shape.
///
/// This is what the format-specific readers in `quilt-io` produce; whether it
/// carries a halo border is decided at placement time by comparing its shape
/// against the tile's admissible geometries.
#[derive(Debug, Clone)]
pub struct TileData {
    data: Vec<f64>,
    ny: usize,
    nx: usize,
}

impl TileData {
    /// Wrap row-major `data` with shape `(ny, nx)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DataLength`] if `data.len() != ny * nx`.
    pub fn new(data: Vec<f64>, ny: usize, nx: usize) -> Result<Self, GridError> {
        if data.len() != ny * nx {
            return Err(GridError::DataLength {
                shape: (ny, nx),
                expected: ny * nx,
                got: data.len(),
            });
        }
        Ok(Self { data, ny, nx })
    }

    /// Shape `(ny, nx)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Row `y` as a slice of length `nx`.
    fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.nx..(y + 1) * self.nx]
    }
}

// ---------------------------------------------------------------------------
// place_tile
// ---------------------------------------------------------------------------

/// Copy one tile's interior region into its location in the global field.
///
/// The tile content must match either the halo-free shape `(ny, nx)` or the
/// haloed shape `(ny + 2*halo, nx + 2*halo)`; in the haloed case a symmetric
/// border of width `halo` is stripped. The `(ny, nx)` core block lands at
/// `[y_off.., x_off..]`.
///
/// # Errors
///
/// Returns [`GridError::FieldShape`] if `field` does not match the tile's
/// declared global size, or [`GridError::ShapeMismatch`] if the content
/// matches neither admissible shape. On error the field is untouched.
pub fn place_tile(field: &mut GlobalField, tile: &TileData, t: &RankTile) -> Result<(), GridError> {
    if field.shape() != (t.nyg, t.nxg) {
        return Err(GridError::FieldShape {
            rank: t.rank,
            field: field.shape(),
            declared: (t.nyg, t.nxg),
        });
    }

    let core = t.core_shape();
    let haloed = t.haloed_shape();
    let off = if tile.shape() == core {
        0
    } else if tile.shape() == haloed {
        t.halo
    } else {
        return Err(GridError::ShapeMismatch {
            rank: t.rank,
            got: tile.shape(),
            core,
            haloed,
        });
    };

    for y in 0..t.ny {
        let src = &tile.row(off + y)[off..off + t.nx];
        let dst = &mut field.row_mut(t.y_off + y)[t.x_off..t.x_off + t.nx];
        dst.copy_from_slice(src);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
