//! BMP (BITMAPINFOHEADER, BI_RGB, 24/32-bit) encoder and decoder.
//!
//! Use top-level [`crate::encode_bmp`], [`crate::decode_bmp`], etc.

mod decode;
mod encode;
mod header;

pub use decode::BmpPermissiveness;
pub use header::pixel_array_len;

pub(crate) use decode::parse_bmp_header;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::limits::Limits;
use alloc::vec::Vec;
use enough::Stop;

/// Decode BMP data into a bitmap.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<Bitmap, BitmapError> {
    let header = decode::parse_bmp_header(data, permissiveness)?;
    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
    }
    stop.check()?;
    decode::decode_bmp_pixels(data, &header, permissiveness, stop)
}

/// Encode to BMP.
pub(crate) fn encode(bitmap: &Bitmap, alpha: bool, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(bitmap, alpha, stop)
}
