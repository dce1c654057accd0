//! BMP decoder for uncompressed 24-bit and 32-bit BITMAPINFOHEADER files.

use enough::Stop;

use super::header::{BI_RGB, BmpHeader, FILE_HEADER_LEN, INFO_HEADER_LEN, MAGIC, row_padding};
use crate::bitmap::{Bitmap, alloc_pixels, grid_len};
use crate::error::BitmapError;
use crate::pixel::Pixel;

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Reject files that violate the BMP format even in non-critical ways.
    /// Validates: file size field matches the data length, non-negative
    /// resolution fields, zero palette count.
    Strict,

    /// Default behavior. Accept deviations that don't affect pixel
    /// decoding (bad file size, bad DPI). Reject: planes != 1,
    /// truncated pixel data.
    #[default]
    Standard,

    /// Accept as much as possible. Zero-fill truncated pixel data and
    /// ignore the planes field.
    Permissive,
}

const ZERO_FILL_FLOOR: usize = 64 * 1024;
const ZERO_FILL_RATIO: usize = 8;

/// Most bytes of missing pixel data Permissive decoding will synthesize for
/// an input holding `present` bytes of it.
fn zero_fill_budget(present: usize) -> usize {
    present.saturating_mul(ZERO_FILL_RATIO).max(ZERO_FILL_FLOOR)
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let end = self.pos.checked_add(N).ok_or(BitmapError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes()?))
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Parse and validate the file header and BITMAPINFOHEADER.
pub(crate) fn parse_bmp_header(
    data: &[u8],
    permissiveness: BmpPermissiveness,
) -> Result<BmpHeader, BitmapError> {
    let is_strict = permissiveness == BmpPermissiveness::Strict;
    let is_permissive = permissiveness == BmpPermissiveness::Permissive;

    let mut c = Cursor::new(data);
    if &c.read_fixed_bytes::<2>()? != MAGIC {
        return Err(BitmapError::UnrecognizedFormat);
    }
    let file_size = c.get_u32_le()?;
    let _reserved = c.get_u32_le()?;
    let data_offset = c.get_u32_le()?;
    let info_size = c.get_u32_le()?;

    // 12 = OS/2 BITMAPCOREHEADER; V4/V5 headers extend the 40-byte layout.
    if info_size < INFO_HEADER_LEN {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "BMP info header size {info_size} (only BITMAPINFOHEADER and later are supported)"
        )));
    }
    if u64::from(data_offset) < FILE_HEADER_LEN as u64 + u64::from(info_size) {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "pixel data offset {data_offset} overlaps the {info_size}-byte info header"
        )));
    }

    let width = c.get_i32_le()?;
    let height = c.get_i32_le()?;
    let planes = c.get_u16_le()?;
    let bpp = c.get_u16_le()?;
    let compression = c.get_u32_le()?;
    let _image_size = c.get_u32_le()?;
    let x_ppm = c.get_i32_le()?;
    let y_ppm = c.get_i32_le()?;
    let colors_used = c.get_u32_le()?;
    let _important_colors = c.get_u32_le()?;

    if width < 0 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP width is negative ({width})"
        )));
    }
    if height == i32::MIN {
        return Err(BitmapError::InvalidHeader("BMP height out of range".into()));
    }
    if !is_permissive && planes != 1 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP planes field is {planes}, expected 1"
        )));
    }
    if bpp != 24 && bpp != 32 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "BMP bit depth {bpp} unsupported (only 24 and 32)"
        )));
    }
    if compression != BI_RGB {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "BMP compression {compression} unsupported (only BI_RGB)"
        )));
    }

    if is_strict {
        if file_size as usize != data.len() {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP file size field ({file_size}) doesn't match actual size ({})",
                data.len()
            )));
        }
        if x_ppm < 0 || y_ppm < 0 {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP resolution is negative ({x_ppm}x{y_ppm})"
            )));
        }
        if colors_used != 0 {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP palette count is {colors_used} for a {bpp}-bit image"
            )));
        }
    }

    Ok(BmpHeader {
        data_offset,
        info_size,
        width: width as u32,
        height: height.unsigned_abs(),
        top_down: height < 0,
        bpp,
        x_ppm,
        y_ppm,
    })
}

// ── Pixel decoding ──────────────────────────────────────────────────

/// Decode the pixel array described by `header` into a grid.
///
/// 24-bit pixels come back opaque; 32-bit pixels keep the stored alpha.
pub(crate) fn decode_bmp_pixels(
    data: &[u8],
    header: &BmpHeader,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<Bitmap, BitmapError> {
    let w = header.width as usize;
    let h = header.height as usize;
    let alpha = header.bpp == 32;
    let bytes_per_pixel = if alpha { 4 } else { 3 };
    let too_large = || BitmapError::DimensionsTooLarge {
        width: header.width,
        height: header.height,
    };

    let pixel_count = grid_len(header.width, header.height).ok_or_else(too_large)?;
    let row_bytes = w.checked_mul(bytes_per_pixel).ok_or_else(too_large)?;
    let stride = row_bytes
        .checked_add(row_padding(w, alpha))
        .ok_or_else(too_large)?;
    let needed = stride.checked_mul(h).ok_or_else(too_large)?;

    let start = (header.data_offset as usize).min(data.len());
    let available = &data[start..];
    if available.len() < needed {
        if permissiveness != BmpPermissiveness::Permissive {
            return Err(BitmapError::UnexpectedEof);
        }
        let missing = needed - available.len();
        if missing > zero_fill_budget(available.len()) {
            return Err(BitmapError::UnexpectedEof);
        }
    }

    let mut pixels = alloc_pixels(header.width, header.height, pixel_count)?;
    if w > 0 {
        for y in 0..h {
            if y % 16 == 0 {
                stop.check()?;
            }
            // Bottom-up files store the last image row first.
            let file_row = if header.top_down { y } else { h - 1 - y };
            let row = available.get(file_row * stride..).unwrap_or(&[]);
            let mut cells = row[..row.len().min(row_bytes)].chunks(bytes_per_pixel);
            for _ in 0..w {
                let mut px = [0u8; 4];
                if let Some(cell) = cells.next() {
                    px[..cell.len()].copy_from_slice(cell);
                }
                pixels.push(if alpha {
                    Pixel::from_argb_u32(u32::from_le_bytes(px))
                } else {
                    Pixel {
                        alpha: Pixel::OPAQUE,
                        red: px[2],
                        green: px[1],
                        blue: px[0],
                    }
                });
            }
        }
    }

    Ok(Bitmap::from_pixels(pixels, header.width, header.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::encode::encode_bmp;
    use enough::Unstoppable;

    fn sample() -> Bitmap {
        let mut bmp = Bitmap::new(3, 2).unwrap();
        bmp.set(0, 0, Pixel::argb(10, 255, 0, 0));
        bmp.set(1, 0, Pixel::argb(20, 0, 255, 0));
        bmp.set(2, 0, Pixel::argb(30, 0, 0, 255));
        bmp.set(0, 1, Pixel::argb(40, 1, 2, 3));
        bmp
    }

    fn decode(data: &[u8], p: BmpPermissiveness) -> Result<Bitmap, BitmapError> {
        let header = parse_bmp_header(data, p)?;
        decode_bmp_pixels(data, &header, p, &Unstoppable)
    }

    #[test]
    fn header_roundtrip() {
        let data = encode_bmp(&sample(), false, &Unstoppable).unwrap();
        let header = parse_bmp_header(&data, BmpPermissiveness::Strict).unwrap();
        assert_eq!(header.width, 3);
        assert_eq!(header.height, 2);
        assert!(!header.top_down);
        assert_eq!(header.bpp, 24);
        assert_eq!(header.data_offset, 54);
        assert_eq!(header.info_size, 40);
        assert_eq!((header.x_ppm, header.y_ppm), (2835, 2835));
    }

    #[test]
    fn decode_32bit_keeps_alpha() {
        let src = sample();
        let data = encode_bmp(&src, true, &Unstoppable).unwrap();
        let back = decode(&data, BmpPermissiveness::Strict).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn decode_24bit_is_opaque() {
        let src = sample();
        let data = encode_bmp(&src, false, &Unstoppable).unwrap();
        let back = decode(&data, BmpPermissiveness::Standard).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(back.get_rgb(x, y), src.get_rgb(x, y));
                assert_eq!(back.get(x, y).alpha, 255);
            }
        }
    }

    #[test]
    fn top_down_rows() {
        let src = sample();
        let mut data = encode_bmp(&src, true, &Unstoppable).unwrap();
        // Flip the stored rows and negate the height.
        data[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        let (top, bottom) = data[54..].split_at_mut(12);
        top.swap_with_slice(bottom);
        let back = decode(&data, BmpPermissiveness::Standard).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn rejects_bad_input() {
        let data = encode_bmp(&sample(), true, &Unstoppable).unwrap();

        assert!(matches!(
            decode(b"PK\x03\x04", BmpPermissiveness::Standard),
            Err(BitmapError::UnrecognizedFormat)
        ));
        assert!(matches!(
            decode(&data[..20], BmpPermissiveness::Standard),
            Err(BitmapError::UnexpectedEof)
        ));

        let mut bad = data.clone();
        bad[28] = 8;
        assert!(matches!(
            decode(&bad, BmpPermissiveness::Standard),
            Err(BitmapError::UnsupportedVariant(_))
        ));

        let mut bad = data.clone();
        bad[30] = 1;
        assert!(matches!(
            decode(&bad, BmpPermissiveness::Standard),
            Err(BitmapError::UnsupportedVariant(_))
        ));

        let mut bad = data.clone();
        bad[14] = 12;
        assert!(matches!(
            decode(&bad, BmpPermissiveness::Standard),
            Err(BitmapError::UnsupportedVariant(_))
        ));

        let mut bad = data.clone();
        bad[26] = 2;
        assert!(matches!(
            decode(&bad, BmpPermissiveness::Standard),
            Err(BitmapError::InvalidHeader(_))
        ));
        assert!(decode(&bad, BmpPermissiveness::Permissive).is_ok());
    }

    #[test]
    fn truncated_pixels_by_permissiveness() {
        let src = sample();
        let data = encode_bmp(&src, true, &Unstoppable).unwrap();
        let cut = &data[..data.len() - 4];
        assert!(matches!(
            decode(cut, BmpPermissiveness::Standard),
            Err(BitmapError::UnexpectedEof)
        ));
        let back = decode(cut, BmpPermissiveness::Permissive).unwrap();
        // Last stored bytes belong to the top row's last pixel.
        assert_eq!(back.get_argb(2, 0), 0);
        assert_eq!(back.get(0, 1), src.get(0, 1));
    }

    fn header_only(width: i32, height: i32, bpp: u16) -> alloc::vec::Vec<u8> {
        let mut data = encode_bmp(&Bitmap::new(0, 0).unwrap(), bpp == 32, &Unstoppable).unwrap();
        data[18..22].copy_from_slice(&width.to_le_bytes());
        data[22..26].copy_from_slice(&height.to_le_bytes());
        data[28..30].copy_from_slice(&bpp.to_le_bytes());
        data
    }

    #[test]
    fn permissive_refuses_to_invent_huge_images() {
        let data = header_only(20000, 20000, 32);
        assert_eq!(data.len(), 54);
        for p in [
            BmpPermissiveness::Strict,
            BmpPermissiveness::Standard,
            BmpPermissiveness::Permissive,
        ] {
            assert!(matches!(decode(&data, p), Err(BitmapError::UnexpectedEof)));
        }
        let wide = header_only(i32::MAX, 1, 24);
        assert!(decode(&wide, BmpPermissiveness::Permissive).is_err());
    }

    #[test]
    fn permissive_fills_small_missing_images() {
        let data = header_only(16, 16, 24);
        let back = decode(&data, BmpPermissiveness::Permissive).unwrap();
        assert_eq!((back.width(), back.height()), (16, 16));
        assert!(back.pixels().iter().all(|&p| p == Pixel::BLACK));
    }

    #[test]
    fn zero_fill_budget_scales_with_input() {
        assert_eq!(zero_fill_budget(0), ZERO_FILL_FLOOR);
        assert_eq!(zero_fill_budget(1 << 20), 8 << 20);
        assert_eq!(zero_fill_budget(usize::MAX), usize::MAX);
    }

    #[test]
    fn strict_checks_file_size() {
        let mut data = encode_bmp(&sample(), false, &Unstoppable).unwrap();
        data.push(0);
        assert!(matches!(
            decode(&data, BmpPermissiveness::Strict),
            Err(BitmapError::InvalidHeader(_))
        ));
        assert!(decode(&data, BmpPermissiveness::Standard).is_ok());
    }

    #[test]
    fn zero_area_decodes() {
        let bmp = Bitmap::new(0, 3).unwrap();
        let data = encode_bmp(&bmp, false, &Unstoppable).unwrap();
        let back = decode(&data, BmpPermissiveness::Strict).unwrap();
        assert_eq!(back.width(), 0);
        assert_eq!(back.height(), 3);
        assert!(back.is_empty());
    }
}
