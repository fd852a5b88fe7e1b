//! Region remapping: pure white regions of a map image read from the back
//! source, every other region reads from the front.

use crate::color;
use crate::error::FilterError;
use crate::grid::PixelGrid;
use crate::region::RegionScanner;

/// Compose an output grid the size of `map` by painting each of the map's
/// regions from one of two sources.
///
/// Both sources are independently rescaled to cover the map (see
/// [`scale_to_map`]) and sampled at the identical coordinates of each region
/// member.
pub fn remap(
    map: &PixelGrid,
    front: &PixelGrid,
    back: &PixelGrid,
) -> Result<PixelGrid, FilterError> {
    if map.width() == 0 || map.height() == 0 {
        return Err(FilterError::EmptyGrid);
    }
    let front = scale_to_map(map, front)?;
    let back = scale_to_map(map, back)?;

    let mut out = PixelGrid::filled(map.width(), map.height(), color::WHITE);
    let mut covered = 0usize;
    for region in RegionScanner::new(map) {
        let source = if region.color == color::WHITE {
            &back
        } else {
            &front
        };
        covered += region.len();
        for &(x, y) in &region.coords {
            out.set(x, y, source.get(x, y));
        }
    }

    let expected = map.width() * map.height();
    if covered != expected {
        return Err(FilterError::RegionTraversalExhausted { covered, expected });
    }
    Ok(out)
}

/// Rescale `image` to match the map's aspect ratio.
///
/// The dimension overshooting the map's aspect ratio is the one resized: a
/// source wider than the map locks its height to the map's and scales the
/// width, otherwise the width locks and the height scales. Scaled sizes
/// truncate toward zero and sampling is nearest-neighbor, consistently on
/// both axes, which keeps the scaled image at least map-sized; the bounds
/// check guards the invariant.
pub fn scale_to_map(map: &PixelGrid, image: &PixelGrid) -> Result<PixelGrid, FilterError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(FilterError::EmptyGrid);
    }
    let map_aspect = map.width() as f64 / map.height() as f64;
    let image_aspect = image.width() as f64 / image.height() as f64;

    let (width, height) = if image_aspect > map_aspect {
        let width = (image.width() as f64 * map.height() as f64 / image.height() as f64) as usize;
        (width, map.height())
    } else {
        let height = (image.height() as f64 * map.width() as f64 / image.width() as f64) as usize;
        (map.width(), height)
    };

    if width < map.width() || height < map.height() {
        return Err(FilterError::ImageBoundsMismatch {
            width,
            height,
            map_width: map.width(),
            map_height: map.height(),
        });
    }
    Ok(image.resize(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgb, BLACK, WHITE};

    #[test]
    fn test_white_regions_read_back_others_front() {
        let map = PixelGrid::from_pixels(2, 2, vec![WHITE, WHITE, BLACK, BLACK]).unwrap();
        let a = Rgb::new(200, 0, 0);
        let b = Rgb::new(0, 0, 200);
        let front = PixelGrid::filled(2, 2, a);
        let back = PixelGrid::filled(2, 2, b);

        let out = remap(&map, &front, &back).unwrap();
        assert_eq!(out.get(0, 0), b);
        assert_eq!(out.get(1, 0), b);
        assert_eq!(out.get(0, 1), a);
        assert_eq!(out.get(1, 1), a);
    }

    #[test]
    fn test_sources_rescale_to_cover_the_map() {
        // wider-than-map front locks height and scales width; taller back
        // locks width and scales height
        let mut map = PixelGrid::filled(2, 2, BLACK);
        map.set(0, 0, WHITE);
        let front = PixelGrid::filled(8, 2, Rgb::new(1, 2, 3));
        let back = PixelGrid::filled(2, 8, Rgb::new(4, 5, 6));

        let out = remap(&map, &front, &back).unwrap();
        assert_eq!(out.width(), 2);
        assert_eq!(out.height(), 2);
        assert_eq!(out.get(0, 0), Rgb::new(4, 5, 6));
        assert_eq!(out.get(1, 1), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_scale_to_map_dimensions() {
        let map = PixelGrid::filled(4, 2, BLACK);
        // aspect 3.0 beats the map's 2.0: height locks to 2, width becomes 6
        let wide = PixelGrid::filled(9, 3, WHITE);
        let scaled = scale_to_map(&map, &wide).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (6, 2));

        // aspect below the map's: width locks to 4, height follows
        let tall = PixelGrid::filled(2, 3, WHITE);
        let scaled = scale_to_map(&map, &tall).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (4, 6));

        // matching aspect is a straight fit
        let same = PixelGrid::filled(8, 4, WHITE);
        let scaled = scale_to_map(&map, &same).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (4, 2));
    }

    #[test]
    fn test_empty_source_rejected() {
        let map = PixelGrid::filled(2, 2, BLACK);
        let empty = PixelGrid::filled(0, 0, BLACK);
        assert!(matches!(
            remap(&map, &empty, &map),
            Err(FilterError::EmptyGrid)
        ));
    }
}
