//! Caps on the grids the crate allocates for decoded images.

use core::mem::size_of;

use crate::error::BitmapError;
use crate::pixel::Pixel;

/// Size caps applied before a decoded image's [`Bitmap`](crate::Bitmap) is
/// allocated.
///
/// Used by [`DecodeRequest::with_limits`](crate::DecodeRequest::with_limits),
/// [`BmpDecoder`](crate::BmpDecoder) and
/// [`ArgbImage::into_bitmap_with_limits`](crate::ArgbImage::into_bitmap_with_limits).
/// Every field defaults to `None` (uncapped).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Cap on `width * height`.
    pub max_pixels: Option<u64>,
    /// Cap on the grid's pixel storage, `width * height * size_of::<Pixel>()`.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Bytes of pixel storage a `width × height` grid needs.
    pub fn grid_bytes(width: u32, height: u32) -> u64 {
        u64::from(width)
            .saturating_mul(u64::from(height))
            .saturating_mul(size_of::<Pixel>() as u64)
    }

    /// Reject a `width × height` grid that would break any cap.
    pub fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        let over = |what: &str, value: u64, cap: u64| {
            BitmapError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {cap}"))
        };
        if let Some(cap) = self.max_width.filter(|&cap| width > cap) {
            return Err(over("width", width.into(), cap.into()));
        }
        if let Some(cap) = self.max_height.filter(|&cap| height > cap) {
            return Err(over("height", height.into(), cap.into()));
        }
        let cells = u64::from(width) * u64::from(height);
        if let Some(cap) = self.max_pixels.filter(|&cap| cells > cap) {
            return Err(over("pixel count", cells, cap));
        }
        let bytes = Self::grid_bytes(width, height);
        if let Some(cap) = self.max_memory_bytes.filter(|&cap| bytes > cap) {
            return Err(over("grid bytes", bytes, cap));
        }
        Ok(())
    }
}
