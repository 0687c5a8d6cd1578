//! Rank-partition layout: one tile geometry per MPI rank.

use crate::error::GridError;

// ---------------------------------------------------------------------------
// RankTile
// ---------------------------------------------------------------------------

/// One rank's placement in the global grid.
///
/// `nx` and `ny` are the interior (halo-free) extents; `halo` is the uniform
/// padding width the writer may or may not have included in the snapshot
/// file. `nxg` and `nyg` are the global grid extents and must agree across
/// every tile of a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTile {
    /// Rank number, unique within a layout.
    pub rank: u32,
    /// X offset of the interior region into the global grid.
    pub x_off: usize,
    /// Y offset of the interior region into the global grid.
    pub y_off: usize,
    /// Interior x extent.
    pub nx: usize,
    /// Interior y extent.
    pub ny: usize,
    /// Uniform halo width.
    pub halo: usize,
    /// Global x extent.
    pub nxg: usize,
    /// Global y extent.
    pub nyg: usize,
}

impl RankTile {
    /// Shape `(ny, nx)` of the interior region.
    pub fn core_shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Shape `(ny + 2*halo, nx + 2*halo)` of the halo-padded region.
    pub fn haloed_shape(&self) -> (usize, usize) {
        (self.ny + 2 * self.halo, self.nx + 2 * self.halo)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Validated, ordered collection of [`RankTile`]s describing one global grid.
///
/// Construction enforces every structural invariant so downstream code can
/// allocate and place without re-checking: non-empty, positive extents,
/// unique ranks, identical `(nxg, nyg)` everywhere, and every interior region
/// inside the global grid.
#[derive(Debug, Clone)]
pub struct Layout {
    tiles: Vec<RankTile>,
}

impl Layout {
    /// Validate `tiles` and build a layout.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyLayout`], [`GridError::ZeroExtent`],
    /// [`GridError::DuplicateRank`], [`GridError::InconsistentGlobalSize`],
    /// or [`GridError::TileOutOfBounds`] on the first violated invariant.
    pub fn new(tiles: Vec<RankTile>) -> Result<Self, GridError> {
        let Some(first) = tiles.first() else {
            return Err(GridError::EmptyLayout);
        };
        let (nyg, nxg) = (first.nyg, first.nxg);

        let mut seen_ranks = Vec::with_capacity(tiles.len());
        for t in &tiles {
            if t.nx == 0 || t.ny == 0 {
                return Err(GridError::ZeroExtent {
                    rank: t.rank,
                    nx: t.nx,
                    ny: t.ny,
                });
            }
            if seen_ranks.contains(&t.rank) {
                return Err(GridError::DuplicateRank { rank: t.rank });
            }
            seen_ranks.push(t.rank);

            if (t.nyg, t.nxg) != (nyg, nxg) {
                return Err(GridError::InconsistentGlobalSize {
                    rank: t.rank,
                    expected: (nyg, nxg),
                    got: (t.nyg, t.nxg),
                });
            }
            if t.x_off + t.nx > t.nxg || t.y_off + t.ny > t.nyg {
                return Err(GridError::TileOutOfBounds {
                    rank: t.rank,
                    x_off: t.x_off,
                    y_off: t.y_off,
                    nx: t.nx,
                    ny: t.ny,
                    nxg: t.nxg,
                    nyg: t.nyg,
                });
            }
        }

        Ok(Self { tiles })
    }

    /// Global grid shape `(nyg, nxg)` shared by all tiles.
    pub fn global_shape(&self) -> (usize, usize) {
        (self.tiles[0].nyg, self.tiles[0].nxg)
    }

    /// Tiles in descriptor order.
    pub fn tiles(&self) -> &[RankTile] {
        &self.tiles
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false`: construction rejects empty layouts.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Halo width declared by the first tile.
    pub fn halo(&self) -> usize {
        self.tiles[0].halo
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
