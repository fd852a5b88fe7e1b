//! Tile hatching: partition an image into fixed-size tiles with a
//! checkerboard map and stamp each tile with the glyph matching its average
//! brightness level.

use std::collections::HashSet;

use crate::cluster;
use crate::color::{self, ColorSpace, Rgb, Rgba};
use crate::error::FilterError;
use crate::grid::{PixelGrid, RgbaGrid};
use crate::region::RegionScanner;

/// Brightness levels a glyph style covers.
pub const GLYPH_LEVELS: usize = 10;

/// Ten pre-rendered glyph tiles indexed by brightness level.
///
/// The caller loads and resizes the style's assets; construction only checks
/// the shape: ten tiles, each exactly `tile_size` square.
pub struct GlyphSet {
    tile_size: usize,
    tiles: Vec<RgbaGrid>,
}

impl GlyphSet {
    pub fn new(tile_size: usize, tiles: Vec<RgbaGrid>) -> Result<Self, FilterError> {
        if tile_size == 0 {
            return Err(FilterError::InvalidTileSize);
        }
        if tiles.len() != GLYPH_LEVELS {
            return Err(FilterError::GlyphCountMismatch(tiles.len()));
        }
        for (index, tile) in tiles.iter().enumerate() {
            if tile.width() != tile_size || tile.height() != tile_size {
                return Err(FilterError::GlyphSizeMismatch {
                    index,
                    expected: tile_size,
                    width: tile.width(),
                    height: tile.height(),
                });
            }
        }
        Ok(Self { tile_size, tiles })
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// The glyph for a brightness level in `0..GLYPH_LEVELS`.
    pub fn level(&self, level: usize) -> &RgbaGrid {
        &self.tiles[level]
    }
}

/// Hatch `image` with the glyphs of `glyphs`, one stamp per tile.
///
/// The image is cropped to whole tiles, a checkerboard map at tile
/// granularity drives the region scan, and each region's color sample is
/// clustered down to a single representative whose brightness picks the
/// glyph. Level 10, reached only by pure white, draws nothing and leaves the
/// white canvas showing.
pub fn hatch(image: &PixelGrid, glyphs: &GlyphSet) -> Result<RgbaGrid, FilterError> {
    let tile = glyphs.tile_size();
    let width = image.width() - image.width() % tile;
    let height = image.height() - image.height() % tile;
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyGrid);
    }
    let image = image.crop(width, height);
    let map = checkerboard(width / tile, height / tile, tile);

    let mut canvas = RgbaGrid::filled(width, height, Rgba::opaque(color::WHITE));
    let mut covered = 0usize;
    for region in RegionScanner::new(&map) {
        covered += region.len();

        let mut colors: HashSet<Rgb> = HashSet::new();
        for &(x, y) in &region.coords {
            colors.insert(image.get(x, y));
        }
        let samples: Vec<Rgb> = colors.into_iter().collect();
        let seeds = vec![samples[0]];
        let clustering = cluster::cluster_with_seeds(ColorSpace, &samples, seeds)?;

        let brightness = clustering.labels()[0].brightness();
        let level = (brightness / 255.0 * GLYPH_LEVELS as f64) as usize;
        if level >= GLYPH_LEVELS {
            continue;
        }
        for &(x, y) in &region.coords {
            if x % tile == 0 && y % tile == 0 {
                canvas.overlay(glyphs.level(level), x, y);
            }
        }
    }

    let expected = width * height;
    if covered != expected {
        return Err(FilterError::RegionTraversalExhausted { covered, expected });
    }
    Ok(canvas)
}

/// A one-pixel-per-tile checkerboard upsampled to `tile` blocks.
///
/// White where `(row + col)` is odd, black elsewhere; the exact alternation
/// is what keeps every map region within tile boundaries.
fn checkerboard(cols: usize, rows: usize, tile: usize) -> PixelGrid {
    let mut small = PixelGrid::filled(cols, rows, color::BLACK);
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 1 {
                small.set(col, row, color::WHITE);
            }
        }
    }
    small.resize(cols * tile, rows * tile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    fn solid_glyphs(tile: usize) -> GlyphSet {
        let tiles = (0..GLYPH_LEVELS)
            .map(|level| {
                let shade = (level * 25) as u8;
                RgbaGrid::filled(tile, tile, Rgba::new(shade, shade, shade, 255))
            })
            .collect();
        GlyphSet::new(tile, tiles).unwrap()
    }

    #[test]
    fn test_glyph_set_shape_checks() {
        assert!(matches!(
            GlyphSet::new(0, vec![]),
            Err(FilterError::InvalidTileSize)
        ));
        let nine = (0..9)
            .map(|_| RgbaGrid::filled(2, 2, Rgba::opaque(BLACK)))
            .collect();
        assert!(matches!(
            GlyphSet::new(2, nine),
            Err(FilterError::GlyphCountMismatch(9))
        ));

        let mut tiles: Vec<RgbaGrid> = (0..GLYPH_LEVELS)
            .map(|_| RgbaGrid::filled(2, 2, Rgba::opaque(BLACK)))
            .collect();
        tiles[4] = RgbaGrid::filled(3, 2, Rgba::opaque(BLACK));
        assert!(matches!(
            GlyphSet::new(2, tiles),
            Err(FilterError::GlyphSizeMismatch { index: 4, .. })
        ));
    }

    #[test]
    fn test_dark_image_stamps_level_zero_everywhere() {
        let image = PixelGrid::filled(4, 4, BLACK);
        let out = hatch(&image, &solid_glyphs(2)).unwrap();
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 4);
        // level 0 glyph is solid black and opaque
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.get(x, y), Rgba::opaque(BLACK));
            }
        }
    }

    #[test]
    fn test_pure_white_tiles_are_skipped() {
        let image = PixelGrid::filled(4, 4, WHITE);
        let out = hatch(&image, &solid_glyphs(2)).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.get(x, y), Rgba::opaque(WHITE));
            }
        }
    }

    #[test]
    fn test_mixed_tiles_bucket_independently() {
        // left tile black (level 0), right tile mid grey (level 5)
        let mut image = PixelGrid::filled(4, 2, BLACK);
        for y in 0..2 {
            for x in 2..4 {
                image.set(x, y, Rgb::new(128, 128, 128));
            }
        }
        let out = hatch(&image, &solid_glyphs(2)).unwrap();
        assert_eq!(out.get(0, 0), Rgba::opaque(BLACK));
        let shade = (5 * 25) as u8;
        assert_eq!(out.get(2, 0), Rgba::new(shade, shade, shade, 255));
    }

    #[test]
    fn test_crops_to_whole_tiles() {
        let image = PixelGrid::filled(5, 7, BLACK);
        let out = hatch(&image, &solid_glyphs(2)).unwrap();
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 6);
    }

    #[test]
    fn test_image_smaller_than_one_tile() {
        let image = PixelGrid::filled(3, 3, BLACK);
        assert!(matches!(
            hatch(&image, &solid_glyphs(4)),
            Err(FilterError::EmptyGrid)
        ));
    }

    #[test]
    fn test_tile_mean_picks_the_bucket() {
        // a tile of half black, half white pixels averages to mid grey
        let mut image = PixelGrid::filled(2, 2, BLACK);
        image.set(0, 1, WHITE);
        image.set(1, 1, WHITE);
        let out = hatch(&image, &solid_glyphs(2)).unwrap();
        // mean of the two distinct colors is (127,127,127), level 4
        let shade = (4 * 25) as u8;
        assert_eq!(out.get(0, 0), Rgba::new(shade, shade, shade, 255));
    }
}
