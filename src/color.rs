//! 8-bit RGB color primitives shared by the clustering filters.

use rand::Rng;

use crate::cluster::Space;

/// RGB color in 8-bit per channel format.
///
/// Equality is exact component match; the filters never compare colors
/// perceptually.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

impl Rgb {
    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_array(arr: [u8; 3]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
        }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Mean of the three channels. Used for ordering and level bucketing
    /// only, not for color science.
    #[inline(always)]
    pub fn brightness(self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }

    /// Euclidean distance in RGB space.
    #[inline(always)]
    pub fn distance(self, other: Self) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// RGBA color for output-only surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline(always)]
    pub const fn opaque(rgb: Rgb) -> Self {
        Self {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            a: 255,
        }
    }
}

/// The Euclidean RGB metric with component-wise integer means.
///
/// The mean of an empty group is a uniformly random color, so an emptied
/// cluster keeps a valid placeholder label instead of aborting the pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorSpace;

impl Space for ColorSpace {
    type Value = Rgb;

    fn dist(&self, a: &Rgb, b: &Rgb) -> f64 {
        a.distance(*b)
    }

    fn mean(&self, colors: &[Rgb]) -> Rgb {
        if colors.is_empty() {
            let mut rng = rand::thread_rng();
            return Rgb::new(rng.gen(), rng.gen(), rng.gen());
        }
        let mut r = 0u64;
        let mut g = 0u64;
        let mut b = 0u64;
        for c in colors {
            r += c.r as u64;
            g += c.g as u64;
            b += c.b as u64;
        }
        let n = colors.len() as u64;
        Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }
}

#[cfg(feature = "native")]
impl From<image::Rgb<u8>> for Rgb {
    fn from(p: image::Rgb<u8>) -> Self {
        Self::new(p.0[0], p.0[1], p.0[2])
    }
}

#[cfg(feature = "native")]
impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

#[cfg(feature = "native")]
impl From<image::Rgba<u8>> for Rgba {
    fn from(p: image::Rgba<u8>) -> Self {
        Self::new(p.0[0], p.0[1], p.0[2], p.0[3])
    }
}

#[cfg(feature = "native")]
impl From<Rgba> for image::Rgba<u8> {
    fn from(c: Rgba) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::cluster_with_seeds;

    #[test]
    fn test_brightness_is_channel_mean() {
        assert_eq!(Rgb::new(0, 0, 0).brightness(), 0.0);
        assert_eq!(Rgb::new(255, 255, 255).brightness(), 255.0);
        assert_eq!(Rgb::new(10, 20, 30).brightness(), 20.0);
    }

    #[test]
    fn test_distance_euclidean() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(3, 4, 0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_mean_uses_integer_division() {
        let colors = [Rgb::new(0, 0, 1), Rgb::new(0, 0, 2), Rgb::new(0, 0, 2)];
        assert_eq!(ColorSpace.mean(&colors), Rgb::new(0, 0, 1));
    }

    #[test]
    fn test_uniform_color_single_cluster() {
        // the single label of a one-cluster fit over a uniform color set is
        // that color, at zero variance
        let color = Rgb::new(12, 200, 7);
        let samples = vec![color; 16];
        let c = cluster_with_seeds(ColorSpace, &samples, vec![color]).unwrap();
        assert_eq!(c.labels(), &[color]);
        assert_eq!(c.variance(), 0.0);
    }
}
