//! Progressive smoothing by repeated self-quantization at halved cluster
//! counts.

use crate::cluster;
use crate::color::ColorSpace;
use crate::error::FilterError;
use crate::grid::PixelGrid;

/// Re-quantize `image` at `k`, then at `k / 2`, and so on until the count
/// drops below `floor`.
///
/// Each pass clusters the current image's own distinct colors and repaints
/// every pixel with its cluster label; no user palette is involved. The
/// count halves every pass, so the loop runs at most `log2(k)` times. A
/// floor of zero behaves like a floor of one.
pub fn smooth(image: &PixelGrid, k: usize, floor: usize) -> Result<PixelGrid, FilterError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(FilterError::EmptyGrid);
    }
    let floor = floor.max(1);
    let mut current = image.clone();
    let mut k = k;
    while k >= floor {
        current = quantize_self(&current, k)?;
        k /= 2;
    }
    Ok(current)
}

/// One quantization pass against the image's own cluster labels.
///
/// The count is clamped to the distinct-color population, so an image a
/// previous pass already reduced never fails the next one.
fn quantize_self(image: &PixelGrid, k: usize) -> Result<PixelGrid, FilterError> {
    let samples = image.distinct_colors();
    let k = k.min(samples.len());
    let clustering = cluster::cluster(ColorSpace, &samples, k)?;

    let pixels = image
        .pixels()
        .iter()
        .map(|p| clustering.labels()[clustering.classify(p)])
        .collect();
    PixelGrid::from_pixels(image.width(), image.height(), pixels)
}
