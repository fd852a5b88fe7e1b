//! Pixel grid abstractions the filters read and write.
//!
//! Grids are row-major with the origin at the top left. Decoding and encoding
//! concrete file formats is the caller's job; behind the `native` feature the
//! grids convert to and from `image` buffers.

use std::collections::HashSet;

use crate::color::{Rgb, Rgba};
use crate::error::FilterError;

/// A width x height grid of RGB pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelGrid {
    /// Create a grid with every pixel set to `fill`.
    pub fn filled(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, FilterError> {
        if width == 0 || height == 0 {
            return Err(FilterError::EmptyGrid);
        }
        if pixels.len() != width * height {
            return Err(FilterError::MalformedGrid {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.pixels[y * self.width + x] = color;
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// The grid's color set with duplicates collapsed. Order is unspecified.
    pub fn distinct_colors(&self) -> Vec<Rgb> {
        let set: HashSet<Rgb> = self.pixels.iter().copied().collect();
        set.into_iter().collect()
    }

    /// The top-left `width` x `height` corner of the grid.
    pub fn crop(&self, width: usize, height: usize) -> Self {
        debug_assert!(width <= self.width && height <= self.height);
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(self.get(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Nearest-neighbor resample to `width` x `height`.
    ///
    /// Source coordinates are the floor of the target/size ratio on both
    /// axes, so upsampling by an integer factor replicates exact blocks.
    pub fn resize(&self, width: usize, height: usize) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let sy = y * self.height / height;
            for x in 0..width {
                let sx = x * self.width / width;
                pixels.push(self.get(sx, sy));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

#[cfg(feature = "native")]
impl PixelGrid {
    /// Read an `image` RGB buffer into a grid.
    pub fn from_image(img: &image::RgbImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            pixels: img.pixels().map(|&p| p.into()).collect(),
        }
    }

    /// Render the grid into an `image` RGB buffer.
    pub fn to_image(&self) -> image::RgbImage {
        let mut img = image::RgbImage::new(self.width as u32, self.height as u32);
        for (i, pixel) in self.pixels.iter().enumerate() {
            let x = (i % self.width) as u32;
            let y = (i / self.width) as u32;
            img.put_pixel(x, y, (*pixel).into());
        }
        img
    }
}

/// An RGBA grid for output surfaces that carry an alpha channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl RgbaGrid {
    /// Create a grid with every pixel set to `fill`.
    pub fn filled(width: usize, height: usize, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Rgba>,
    ) -> Result<Self, FilterError> {
        if width == 0 || height == 0 {
            return Err(FilterError::EmptyGrid);
        }
        if pixels.len() != width * height {
            return Err(FilterError::MalformedGrid {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.width + x]
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, color: Rgba) {
        self.pixels[y * self.width + x] = color;
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Paint `tile` with its top-left corner at (`left`, `top`), using the
    /// tile's alpha as the paint mask. Pixels falling outside the grid are
    /// dropped.
    pub fn overlay(&mut self, tile: &RgbaGrid, left: usize, top: usize) {
        for ty in 0..tile.height {
            let y = top + ty;
            if y >= self.height {
                break;
            }
            for tx in 0..tile.width {
                let x = left + tx;
                if x >= self.width {
                    continue;
                }
                let p = tile.get(tx, ty);
                if p.a == 0 {
                    continue;
                }
                let under = self.get(x, y);
                self.set(x, y, blend(p, under));
            }
        }
    }
}

/// Source-over blend of `top` onto `under` with 8-bit integer math.
#[inline]
fn blend(top: Rgba, under: Rgba) -> Rgba {
    let a = top.a as u32;
    let inv = 255 - a;
    Rgba::new(
        ((top.r as u32 * a + under.r as u32 * inv) / 255) as u8,
        ((top.g as u32 * a + under.g as u32 * inv) / 255) as u8,
        ((top.b as u32 * a + under.b as u32 * inv) / 255) as u8,
        under.a.max(top.a),
    )
}

#[cfg(feature = "native")]
impl RgbaGrid {
    /// Read an `image` RGBA buffer into a grid.
    pub fn from_image(img: &image::RgbaImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            pixels: img.pixels().map(|&p| p.into()).collect(),
        }
    }

    /// Render the grid into an `image` RGBA buffer.
    pub fn to_image(&self) -> image::RgbaImage {
        let mut img = image::RgbaImage::new(self.width as u32, self.height as u32);
        for (i, pixel) in self.pixels.iter().enumerate() {
            let x = (i % self.width) as u32;
            let y = (i / self.width) as u32;
            img.put_pixel(x, y, (*pixel).into());
        }
        img
    }
}
