//! BITMAPFILEHEADER + BITMAPINFOHEADER layout.
//!
//! ```text
//! offset size field
//!      0    2 magic "BM"
//!      2    4 file size (pixel array + 54)
//!      6    4 reserved (0)
//!     10    4 pixel array offset (54)
//!     14    4 DIB header size (40)
//!     18    4 width (i32)
//!     22    4 height (i32, positive = bottom-up)
//!     26    2 planes (1)
//!     28    2 bits per pixel (24 or 32)
//!     30    4 compression (0 = BI_RGB)
//!     34    4 image size (0)
//!     38    4 x resolution (2835 px/m)
//!     42    4 y resolution (2835 px/m)
//!     46    4 palette colors (0)
//!     50    4 important colors (0)
//! ```

use alloc::vec::Vec;

pub(crate) const MAGIC: &[u8; 2] = b"BM";
pub(crate) const FILE_HEADER_LEN: usize = 14;
pub(crate) const INFO_HEADER_LEN: u32 = 40;
/// File header + BITMAPINFOHEADER.
pub(crate) const HEADER_LEN: usize = 54;
/// 72 DPI in pixels per meter.
pub(crate) const RESOLUTION_PPM: u32 = 2835;
pub(crate) const BI_RGB: u32 = 0;

/// Zero bytes appended to each 24-bit row so its length is a multiple of 4.
pub(crate) fn row_padding(width: usize, alpha: bool) -> usize {
    if alpha { 0 } else { (4 - (width * 3) % 4) % 4 }
}

/// Encoded row length in bytes, padding included.
pub(crate) fn row_stride(width: usize, alpha: bool) -> usize {
    let bpp = if alpha { 4 } else { 3 };
    width * bpp + row_padding(width, alpha)
}

/// Pixel array length in bytes for a `width × height` image.
pub fn pixel_array_len(width: usize, height: usize, alpha: bool) -> usize {
    row_stride(width, alpha) * height
}

/// Append the 54-byte header for a bottom-up BI_RGB image.
pub(crate) fn write_header(out: &mut Vec<u8>, width: u32, height: u32, pixel_array_size: u32, bpp: u16) {
    // File header (14 bytes)
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&(pixel_array_size + HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(HEADER_LEN as u32).to_le_bytes()); // data offset

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&BI_RGB.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // image size, unspecified for BI_RGB
    out.extend_from_slice(&RESOLUTION_PPM.to_le_bytes());
    out.extend_from_slice(&RESOLUTION_PPM.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}

/// Fields read back from a BMP header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub data_offset: u32,
    pub info_size: u32,
    pub width: u32,
    pub height: u32,
    /// Rows stored top-to-bottom (negative height field).
    pub top_down: bool,
    pub bpp: u16,
    pub x_ppm: i32,
    pub y_ppm: i32,
}
