//! Clustering-driven image filters.
//!
//! A generic k-means engine with a pluggable distance/mean contract, and the
//! pixel-region filters built on it: palette recoloring, two-source region
//! remapping, glyph tile hatching and progressive smoothing.

pub mod cluster;
pub mod color;
pub mod error;
pub mod grid;
pub mod recolor;
pub mod region;
pub mod rehatch;
pub mod remap;
pub mod smooth;

// Re-export key types for easy usage
pub use cluster::{cluster, cluster_with_seeds, Clustering, Space};
pub use color::{ColorSpace, Rgb, Rgba, BLACK, WHITE};
pub use error::{ClusterError, FilterError};
pub use grid::{PixelGrid, RgbaGrid};
pub use recolor::{quantize, quantize_with};
pub use region::{Region, RegionScanner};
pub use rehatch::{hatch, GlyphSet, GLYPH_LEVELS};
pub use remap::{remap, scale_to_map};
pub use smooth::smooth;
