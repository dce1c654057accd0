//! BMP encoder: uncompressed 24-bit and 32-bit BMP.

use alloc::vec::Vec;
use enough::Stop;

use super::header::{self, HEADER_LEN};
use crate::bitmap::Bitmap;
use crate::error::BitmapError;

/// Encode a bitmap to BMP.
///
/// With `alpha`, each pixel is its packed ARGB word in little-endian order
/// (B, G, R, A). Without, the packed RGB word's low three bytes (B, G, R)
/// followed by zero padding up to a 4-byte row boundary.
pub(crate) fn encode_bmp(bitmap: &Bitmap, alpha: bool, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let (width, height) = (bitmap.width(), bitmap.height());
    let w = width as usize;
    let h = height as usize;
    let bytes_per_pixel = if alpha { 4 } else { 3 };

    let row_stride = w
        .checked_mul(bytes_per_pixel)
        .and_then(|r| r.checked_add(header::row_padding(w, alpha)))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let pixel_data_size = row_stride
        .checked_mul(h)
        .filter(|&n| n <= (u32::MAX as usize) - HEADER_LEN)
        .filter(|_| width <= i32::MAX as u32 && height <= i32::MAX as u32)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

    let mut out = Vec::with_capacity(HEADER_LEN + pixel_data_size);
    header::write_header(
        &mut out,
        width,
        height,
        pixel_data_size as u32,
        if alpha { 32 } else { 24 },
    );

    stop.check()?;

    let pad_bytes = header::row_padding(w, alpha);
    // Bottom-up: last image row first.
    for (i, row) in bitmap.rows().rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        if alpha {
            for p in row {
                out.extend_from_slice(&p.to_argb_u32().to_le_bytes());
            }
        } else {
            for p in row {
                out.extend_from_slice(&p.to_rgb_u32().to_le_bytes()[..3]);
            }
            out.extend(core::iter::repeat_n(0u8, pad_bytes));
        }
    }

    debug_assert_eq!(out.len(), HEADER_LEN + pixel_data_size);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use enough::Unstoppable;

    fn le32(data: &[u8], off: usize) -> u32 {
        u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
    }

    #[test]
    fn header_fields() {
        let bmp = Bitmap::new(3, 2).unwrap();
        let out = encode_bmp(&bmp, false, &Unstoppable).unwrap();
        assert_eq!(&out[0..2], b"BM");
        assert_eq!(le32(&out, 2) as usize, out.len());
        assert_eq!(le32(&out, 6), 0);
        assert_eq!(le32(&out, 10), 54);
        assert_eq!(le32(&out, 14), 40);
        assert_eq!(le32(&out, 18), 3);
        assert_eq!(le32(&out, 22), 2);
        assert_eq!(&out[26..30], &[1, 0, 24, 0]);
        assert_eq!(le32(&out, 30), 0);
        assert_eq!(le32(&out, 34), 0);
        assert_eq!(le32(&out, 38), 2835);
        assert_eq!(le32(&out, 42), 2835);
        assert_eq!(le32(&out, 46), 0);
        assert_eq!(le32(&out, 50), 0);

        let out32 = encode_bmp(&bmp, true, &Unstoppable).unwrap();
        assert_eq!(&out32[26..30], &[1, 0, 32, 0]);
    }

    #[test]
    fn rows_bottom_up_bgr_order() {
        let mut bmp = Bitmap::new(2, 2).unwrap();
        bmp.set(0, 0, Pixel::argb(122, 0, 255, 255));
        bmp.set(0, 1, Pixel::argb(255, 255, 255, 0));
        bmp.set(1, 0, Pixel::argb(122, 255, 255, 255));
        bmp.set(1, 1, Pixel::argb(255, 255, 0, 0));

        let out = encode_bmp(&bmp, true, &Unstoppable).unwrap();
        assert_eq!(
            &out[54..],
            &[
                0, 255, 255, 255, 0, 0, 255, 255, // bottom row (y = 1)
                255, 255, 0, 122, 255, 255, 255, 122, // top row (y = 0)
            ]
        );

        let out = encode_bmp(&bmp, false, &Unstoppable).unwrap();
        assert_eq!(
            &out[54..],
            &[
                0, 255, 255, 0, 0, 255, 0, 0, // bottom row + 2 padding
                255, 255, 0, 255, 255, 255, 0, 0, // top row + 2 padding
            ]
        );
    }

    #[test]
    fn zero_area_is_header_only() {
        for (w, h) in [(0, 0), (0, 3), (4, 0)] {
            let bmp = Bitmap::new(w, h).unwrap();
            for alpha in [false, true] {
                let out = encode_bmp(&bmp, alpha, &Unstoppable).unwrap();
                assert_eq!(out.len(), 54);
                assert_eq!(le32(&out, 2), 54);
            }
        }
    }
}
