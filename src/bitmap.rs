//! Fixed-size grid of [`Pixel`]s.

use alloc::vec::Vec;
use core::mem::size_of;

use crate::error::BitmapError;
use crate::pixel::{ColorInput, Pixel};

/// A `width × height` grid of pixels, stored row-major top-to-bottom.
///
/// Dimensions are fixed at construction. A grid with zero width or height is
/// valid; it has no addressable cells and [`get`](Self::get) returns
/// [`Pixel::BLACK`] for any coordinate.
///
/// `Clone` copies every cell, so a clone can be mutated independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
}

impl Bitmap {
    /// Allocate a grid filled with opaque black.
    ///
    /// Returns [`BitmapError::InvalidDimension`] if either dimension is
    /// negative, and [`BitmapError::DimensionsTooLarge`] if the grid cannot be
    /// allocated.
    pub fn new(width: i32, height: i32) -> Result<Self, BitmapError> {
        let (width, height, len) = checked_dimensions(width, height)?;
        let mut pixels = alloc_pixels(width, height, len)?;
        pixels.resize(len, Pixel::BLACK);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build a grid from `width * height` packed `0xAARRGGBB` values,
    /// row-major top-to-bottom.
    pub fn from_argb(width: i32, height: i32, argb: &[u32]) -> Result<Self, BitmapError> {
        let (width, height, len) = checked_dimensions(width, height)?;
        if argb.len() < len {
            return Err(BitmapError::BufferTooSmall {
                needed: len,
                actual: argb.len(),
            });
        }
        if argb.len() > len {
            return Err(BitmapError::InvalidData(alloc::format!(
                "{} ARGB values for a {width}x{height} grid",
                argb.len()
            )));
        }
        Ok(Self {
            pixels: argb.iter().map(|&c| Pixel::from_argb_u32(c)).collect(),
            width,
            height,
        })
    }

    pub(crate) fn from_pixels(pixels: Vec<Pixel>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The pixel at `(x, y)`.
    ///
    /// On a zero-area grid this returns [`Pixel::BLACK`] whatever the
    /// coordinates.
    ///
    /// # Panics
    ///
    /// On a non-empty grid, panics if `x >= width` or `y >= height`. Use
    /// [`try_get`](Self::try_get) for a checked read.
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        if self.is_empty() {
            return Pixel::BLACK;
        }
        self.pixels[self.index(x, y)]
    }

    /// The pixel at `(x, y)`, or `None` when out of bounds.
    pub fn try_get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Packed `0xAARRGGBB` of the pixel at `(x, y)`. Same rules as [`get`](Self::get).
    pub fn get_argb(&self, x: u32, y: u32) -> u32 {
        self.get(x, y).to_argb_u32()
    }

    /// Packed `0x00RRGGBB` of the pixel at `(x, y)`. Same rules as [`get`](Self::get).
    pub fn get_rgb(&self, x: u32, y: u32) -> u32 {
        self.get(x, y).to_rgb_u32()
    }

    /// Mutable access to the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds (always, on a zero-area grid).
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Pixel {
        let idx = self.index(x, y);
        &mut self.pixels[idx]
    }

    /// Store a copy of `pixel` at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        *self.pixel_mut(x, y) = pixel;
    }

    /// Update the pixel at `(x, y)` through [`Pixel::set_color`].
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn set_color(&mut self, x: u32, y: u32, color: impl Into<ColorInput>) {
        self.pixel_mut(x, y).set_color(color);
    }

    /// All pixels, row-major top-to-bottom.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterate rows top-to-bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Pixel]> + ExactSizeIterator {
        // chunks_exact(0) panics; a zero-width grid yields no rows.
        let w = (self.width as usize).max(1);
        let rows = if self.width == 0 { 0 } else { self.height as usize };
        self.pixels.chunks_exact(w).take(rows)
    }

    /// Packed `0xAARRGGBB` values, row-major top-to-bottom.
    pub fn to_argb_vec(&self) -> Vec<u32> {
        self.pixels.iter().map(|p| p.to_argb_u32()).collect()
    }

    /// Size in bytes of the encoded BMP pixel array, row padding included.
    pub fn pixel_data_len(&self, alpha: bool) -> usize {
        crate::bmp::pixel_array_len(self.width as usize, self.height as usize, alpha)
    }

    /// Copy into an [`imgref::ImgVec`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.pixels.iter().map(|&p| p.into()).collect(),
            self.width as usize,
            self.height as usize,
        )
    }

    /// Build a grid from any [`imgref::ImgRef`] of RGBA pixels (stride is respected).
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGBA8>) -> Result<Self, BitmapError> {
        let too_large = |_| dimensions_too_large(img.width(), img.height());
        let width = i32::try_from(img.width()).map_err(too_large)?;
        let height = i32::try_from(img.height()).map_err(too_large)?;
        let (width, height, len) = checked_dimensions(width, height)?;
        let mut pixels = alloc_pixels(width, height, len)?;
        for row in img.rows() {
            pixels.extend(row.iter().map(|&p| Pixel::from(p)));
        }
        Ok(Self::from_pixels(pixels, width, height))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} bitmap",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

/// Validate signed dimensions, returning `(width, height, cell count)`.
///
/// The cell count is guaranteed to fit a `Vec<Pixel>` (at most `isize::MAX`
/// bytes).
pub(crate) fn checked_dimensions(width: i32, height: i32) -> Result<(u32, u32, usize), BitmapError> {
    if width < 0 || height < 0 {
        return Err(BitmapError::InvalidDimension {
            width: i64::from(width),
            height: i64::from(height),
        });
    }
    let (w, h) = (width as u32, height as u32);
    let len = grid_len(w, h).ok_or(BitmapError::DimensionsTooLarge {
        width: w,
        height: h,
    })?;
    Ok((w, h, len))
}

/// [`BitmapError::DimensionsTooLarge`] for `usize` dimensions, saturating
/// at `u32::MAX`.
#[cfg(feature = "imgref")]
fn dimensions_too_large(width: usize, height: usize) -> BitmapError {
    BitmapError::DimensionsTooLarge {
        width: u32::try_from(width).unwrap_or(u32::MAX),
        height: u32::try_from(height).unwrap_or(u32::MAX),
    }
}

/// Cell count of a `width × height` grid, if its storage fits a `Vec`.
pub(crate) fn grid_len(width: u32, height: u32) -> Option<usize> {
    let len = (width as usize).checked_mul(height as usize)?;
    let bytes = len.checked_mul(size_of::<Pixel>())?;
    (bytes <= isize::MAX as usize).then_some(len)
}

/// An empty buffer with room for `len` pixels; allocation failure is
/// reported instead of aborting.
pub(crate) fn alloc_pixels(width: u32, height: u32, len: usize) -> Result<Vec<Pixel>, BitmapError> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
    Ok(pixels)
}
