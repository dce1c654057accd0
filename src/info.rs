use crate::bmp::{BmpPermissiveness, parse_bmp_header};
use crate::error::BitmapError;

/// Header-level facts about a BMP file, read without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// 24 or 32.
    pub bits_per_pixel: u16,
    /// Whether the pixel array carries an alpha byte per pixel.
    pub has_alpha: bool,
    /// Rows stored top-to-bottom (negative height in the header).
    pub top_down: bool,
    /// Offset of the pixel array from the start of the file.
    pub data_offset: u32,
    /// Size of the DIB header (40 for BITMAPINFOHEADER, larger for V4/V5).
    pub header_size: u32,
    /// Horizontal and vertical resolution in pixels per meter.
    pub resolution_ppm: (i32, i32),
}

impl ImageInfo {
    /// Probe BMP headers.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let h = parse_bmp_header(data, BmpPermissiveness::Permissive)?;
        Ok(Self {
            width: h.width,
            height: h.height,
            bits_per_pixel: h.bpp,
            has_alpha: h.bpp == 32,
            top_down: h.top_down,
            data_offset: h.data_offset,
            header_size: h.info_size,
            resolution_ppm: (h.x_ppm, h.y_ppm),
        })
    }

    /// Horizontal and vertical resolution converted to dots per inch.
    pub fn dpi(&self) -> (f32, f32) {
        let (x, y) = self.resolution_ppm;
        (x as f32 * 0.0254, y as f32 * 0.0254)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bitmap, Unstoppable, encode_bmp_argb};

    #[test]
    fn probe_encoded() {
        let bmp = Bitmap::new(5, 7).unwrap();
        let data = encode_bmp_argb(&bmp, Unstoppable).unwrap();
        let info = ImageInfo::from_bytes(&data).unwrap();
        assert_eq!((info.width, info.height), (5, 7));
        assert_eq!(info.bits_per_pixel, 32);
        assert!(info.has_alpha);
        assert!(!info.top_down);
        assert_eq!(info.data_offset, 54);
        assert_eq!(info.header_size, 40);
        let (dx, dy) = info.dpi();
        assert!((dx - 72.0).abs() < 0.01 && (dy - 72.0).abs() < 0.01);
    }

    #[test]
    fn probe_rejects_non_bmp() {
        assert!(matches!(
            ImageInfo::from_bytes(b"GIF89a\x01\x00\x01\x00"),
            Err(BitmapError::UnrecognizedFormat)
        ));
    }
}
