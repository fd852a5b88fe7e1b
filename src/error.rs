//! Typed errors for the clustering engine and the filters built on it.

use thiserror::Error;

/// Errors raised by the generic clustering engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    #[error("cannot draw {requested} initial labels from {available} samples")]
    InsufficientSamples { requested: usize, available: usize },
}

/// Errors raised by the image filters.
///
/// Every failure is reported at the point of detection; no filter ever
/// returns a partially painted grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error("palette needs at least 3 colors, got {0}")]
    PaletteTooSmall(usize),

    #[error("{clusters} clusters cannot be paired one-to-one with {palette} palette colors")]
    PaletteSizeMismatch { clusters: usize, palette: usize },

    #[error("rescaled source is {width}x{height}, smaller than the {map_width}x{map_height} map")]
    ImageBoundsMismatch {
        width: usize,
        height: usize,
        map_width: usize,
        map_height: usize,
    },

    #[error("region scan covered {covered} of {expected} coordinates")]
    RegionTraversalExhausted { covered: usize, expected: usize },

    #[error("tile size must be at least 1")]
    InvalidTileSize,

    #[error("pixel grid must have non-zero width and height")]
    EmptyGrid,

    #[error("pixel buffer of length {len} does not form a {width}x{height} grid")]
    MalformedGrid {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("glyph set needs 10 tiles, got {0}")]
    GlyphCountMismatch(usize),

    #[error("glyph tile {index} is {width}x{height}, expected {expected}x{expected}")]
    GlyphSizeMismatch {
        index: usize,
        expected: usize,
        width: usize,
        height: usize,
    },
}
