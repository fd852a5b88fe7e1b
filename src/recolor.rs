//! Palette recoloring: cluster an image's color set and substitute each
//! cluster with the user color of matching brightness rank.

use ordered_float::OrderedFloat;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cluster::{self, Clustering};
use crate::color::{ColorSpace, Rgb};
use crate::error::FilterError;
use crate::grid::PixelGrid;

/// Minimum palette length accepted by [`quantize`].
const MIN_PALETTE: usize = 3;

/// Recolor `grid` onto `palette`, with one cluster per palette entry.
///
/// The grid's distinct colors are clustered at `k = palette.len()`, both the
/// cluster labels and the palette are ordered by ascending brightness, and
/// every pixel is repainted with the palette color whose brightness rank
/// matches its cluster's.
pub fn quantize(grid: &PixelGrid, palette: &[Rgb]) -> Result<PixelGrid, FilterError> {
    if palette.len() < MIN_PALETTE {
        return Err(FilterError::PaletteTooSmall(palette.len()));
    }
    quantize_with(grid, palette, palette.len())
}

/// Recolor with an explicit cluster count.
///
/// The positional brightness pairing needs exactly one palette color per
/// cluster; any other shape is an error rather than the silent truncation of
/// whichever sequence is longer.
pub fn quantize_with(
    grid: &PixelGrid,
    palette: &[Rgb],
    k: usize,
) -> Result<PixelGrid, FilterError> {
    if grid.width() == 0 || grid.height() == 0 {
        return Err(FilterError::EmptyGrid);
    }
    if palette.len() != k {
        return Err(FilterError::PaletteSizeMismatch {
            clusters: k,
            palette: palette.len(),
        });
    }

    let samples = grid.distinct_colors();
    let clustering = cluster::cluster(ColorSpace, &samples, k)?;
    let mapped = pair_by_brightness(&clustering, palette);
    render(grid, &clustering, &mapped)
}

/// Pair cluster labels with palette colors, both in ascending brightness
/// order. `mapped[i]` is the output color for label index `i`.
fn pair_by_brightness(clustering: &Clustering<ColorSpace>, palette: &[Rgb]) -> Vec<Rgb> {
    let mut label_order: Vec<usize> = (0..clustering.k()).collect();
    label_order.sort_by_key(|&i| OrderedFloat(clustering.labels()[i].brightness()));

    let mut palette_sorted: Vec<Rgb> = palette.to_vec();
    palette_sorted.sort_by_key(|c| OrderedFloat(c.brightness()));

    let mut mapped = vec![Rgb::default(); clustering.k()];
    for (rank, &label_idx) in label_order.iter().enumerate() {
        mapped[label_idx] = palette_sorted[rank];
    }
    mapped
}

/// Classify every pixel against the finished clustering and substitute its
/// mapped color. Classification is pure, so rows fan out when the `parallel`
/// feature is on.
fn render(
    grid: &PixelGrid,
    clustering: &Clustering<ColorSpace>,
    mapped: &[Rgb],
) -> Result<PixelGrid, FilterError> {
    #[cfg(feature = "parallel")]
    let pixels: Vec<Rgb> = grid
        .pixels()
        .par_iter()
        .map(|p| mapped[clustering.classify(p)])
        .collect();

    #[cfg(not(feature = "parallel"))]
    let pixels: Vec<Rgb> = grid
        .pixels()
        .iter()
        .map(|p| mapped[clustering.classify(p)])
        .collect();

    PixelGrid::from_pixels(grid.width(), grid.height(), pixels)
}
