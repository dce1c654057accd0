//! # zenbmp
//!
//! A pixel grid with clamped ARGB colors, and a Windows BMP
//! (BITMAPINFOHEADER) encoder and decoder for it.
//!
//! ## Model
//!
//! - [`Pixel`]: alpha, red, green, blue as `u8`. Constructors taking wider
//!   integers clamp each channel to `0..=255`; they never wrap or fail.
//!   Packs to and from `0xAARRGGBB`.
//! - [`Bitmap`]: a fixed `width × height` grid of pixels, row-major. Bulk
//!   conversion to and from flat ARGB arrays is the hand-off point for
//!   other image libraries.
//!
//! ## BMP
//!
//! - 24-bit (BGR, rows padded to 4 bytes) or 32-bit (BGRA) pixels, BI_RGB only
//! - Bottom-up rows on encode; bottom-up and top-down accepted on decode
//! - 72 DPI resolution fields
//!
//! ## Non-Goals
//!
//! - RLE/bitfield compression, palettes, bit depths other than 24 and 32
//! - OS/2 headers, multi-frame images
//!
//! ## Usage
//!
//! ```
//! use zenbmp::{Bitmap, DecodeRequest, EncodeRequest, Pixel, Unstoppable};
//!
//! let mut bmp = Bitmap::new(2, 2)?;
//! bmp.set(0, 0, Pixel::argb(122, 0, 255, 255));
//! bmp.set_color(1, 1, (255, 0, 0));
//! bmp.set_color(1, 0, (-20, 300, 7)); // clamped to (0, 255, 7)
//!
//! let bytes = EncodeRequest::bmp_with_alpha().encode(&bmp, Unstoppable)?;
//! let decoded = DecodeRequest::new(&bytes).decode(Unstoppable)?;
//! assert_eq!(decoded, bmp);
//! # Ok::<(), zenbmp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod decode;
mod encode;
mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;

#[cfg(feature = "std")]
mod file;

use alloc::vec::Vec;

// Re-exports
pub use bitmap::Bitmap;
pub use bmp::BmpPermissiveness;
pub use decode::{ArgbImage, BmpDecoder, DecodeRequest, ImageDecoder};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
#[cfg(feature = "std")]
pub use file::BmpFile;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{ColorInput, Pixel, clamp_channel, pack_argb, pack_rgb};

/// Encode as 24-bit BMP (alpha dropped).
pub fn encode_bmp(bitmap: &Bitmap, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(bitmap, false, &stop)
}

/// Encode as 32-bit BMP (alpha kept).
pub fn encode_bmp_argb(bitmap: &Bitmap, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(bitmap, true, &stop)
}

/// Decode a 24- or 32-bit BMP with default permissiveness and no limits.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Bitmap, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}
