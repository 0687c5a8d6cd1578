//! Error types for quilt-grid.

/// Error type for layout validation and tile placement.
///
/// Covers structural problems in a rank layout (empty, conflicting global
/// sizes, out-of-bounds tiles) and geometry problems when placing one tile's
/// content into the global field.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Returned when a layout contains no tiles.
    #[error("layout contains no tiles")]
    EmptyLayout,

    /// Returned when a tile declares a zero interior extent.
    #[error("tile for rank {rank} has zero extent: nx={nx}, ny={ny}")]
    ZeroExtent {
        /// Rank of the offending tile.
        rank: u32,
        /// Declared local x extent.
        nx: usize,
        /// Declared local y extent.
        ny: usize,
    },

    /// Returned when two tiles in one layout claim the same rank.
    #[error("duplicate rank {rank} in layout")]
    DuplicateRank {
        /// The rank that appears more than once.
        rank: u32,
    },

    /// Returned when tiles disagree on the global grid size.
    #[error(
        "inconsistent global size: rank {rank} declares {}x{}, expected {}x{}",
        got.1, got.0, expected.1, expected.0
    )]
    InconsistentGlobalSize {
        /// Rank of the first tile that disagrees.
        rank: u32,
        /// Global `(nyg, nxg)` declared by the first tile in the layout.
        expected: (usize, usize),
        /// Global `(nyg, nxg)` declared by the disagreeing tile.
        got: (usize, usize),
    },

    /// Returned when a tile's interior extends past the global grid.
    #[error(
        "tile for rank {rank} exceeds global extent: \
         x {x_off}+{nx} or y {y_off}+{ny} past {nxg}x{nyg}"
    )]
    TileOutOfBounds {
        /// Rank of the offending tile.
        rank: u32,
        /// Tile x offset.
        x_off: usize,
        /// Tile y offset.
        y_off: usize,
        /// Tile x extent.
        nx: usize,
        /// Tile y extent.
        ny: usize,
        /// Global x extent.
        nxg: usize,
        /// Global y extent.
        nyg: usize,
    },

    /// Returned when a global field does not match a tile's declared global size.
    #[error(
        "global field is {}x{} but rank {rank} declares {}x{}",
        field.1, field.0, declared.1, declared.0
    )]
    FieldShape {
        /// Rank of the tile being placed.
        rank: u32,
        /// Shape `(ny, nx)` of the field being written.
        field: (usize, usize),
        /// Global shape `(nyg, nxg)` declared by the tile.
        declared: (usize, usize),
    },

    /// Returned when raw tile data does not fill its declared shape.
    #[error("tile data has {got} values, expected {expected} for shape {}x{}", shape.1, shape.0)]
    DataLength {
        /// Declared shape `(ny, nx)`.
        shape: (usize, usize),
        /// Expected number of values (`ny * nx`).
        expected: usize,
        /// Actual number of values supplied.
        got: usize,
    },

    /// Returned when tile content matches neither admissible geometry.
    #[error(
        "tile shape mismatch for rank {rank}: got {}x{}, expected {}x{} (no halo) or {}x{} (with halo)",
        got.0, got.1, core.0, core.1, haloed.0, haloed.1
    )]
    ShapeMismatch {
        /// Rank of the offending tile.
        rank: u32,
        /// Shape `(ny, nx)` actually read from the file.
        got: (usize, usize),
        /// Expected halo-free shape `(ny, nx)`.
        core: (usize, usize),
        /// Expected haloed shape `(ny + 2*halo, nx + 2*halo)`.
        haloed: (usize, usize),
    },
}
