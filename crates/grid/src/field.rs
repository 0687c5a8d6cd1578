//! Dense row-major global field storage.

/// Dense 2D field of shape `(ny, nx)`, row-major with row index = y.
///
/// Allocated zero-filled once per assembly call, written by successive tile
/// placements, then handed to the caller. There is no cross-call shared
/// state.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalField {
    ny: usize,
    nx: usize,
    data: Vec<f64>,
}

impl GlobalField {
    /// Allocate a zero-filled field of shape `(ny, nx)`.
    pub fn zeros(ny: usize, nx: usize) -> Self {
        Self {
            ny,
            nx,
            data: vec![0.0; ny * nx],
        }
    }

    /// Shape `(ny, nx)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Value at `(y, x)`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= ny` or `x >= nx`.
    pub fn get(&self, y: usize, x: usize) -> f64 {
        assert!(y < self.ny && x < self.nx, "index ({y}, {x}) out of bounds");
        self.data[y * self.nx + x]
    }

    /// Row `y` as a slice of length `nx`.
    pub fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.nx..(y + 1) * self.nx]
    }

    /// Mutable row `y`.
    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [f64] {
        &mut self.data[y * self.nx..(y + 1) * self.nx]
    }

    /// Flat row-major view of the whole field.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterator over rows, y ascending.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.nx)
    }
}
