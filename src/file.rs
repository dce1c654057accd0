//! Loading and saving bitmaps on the filesystem.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use crate::bitmap::Bitmap;
use crate::decode::ImageDecoder;
use crate::encode::EncodeRequest;
use crate::error::BitmapError;
use crate::limits::Limits;

/// A bitmap bound for (or read from) a BMP file.
///
/// Reading goes through any [`ImageDecoder`], so the source file does not
/// have to be a BMP. Writing always produces a BITMAPINFOHEADER BMP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpFile {
    bitmap: Bitmap,
}

impl BmpFile {
    /// Wrap a deep copy of `bitmap`.
    pub fn from_bitmap(bitmap: &Bitmap) -> Self {
        Self {
            bitmap: bitmap.clone(),
        }
    }

    /// Read `path` and decode it with `decoder`.
    pub fn open(path: impl AsRef<Path>, decoder: &dyn ImageDecoder) -> Result<Self, BitmapError> {
        Self::open_with_limits(path, decoder, &Limits::default())
    }

    /// Like [`open`](Self::open), but refuse decoded images over `limits`.
    pub fn open_with_limits(
        path: impl AsRef<Path>,
        decoder: &dyn ImageDecoder,
        limits: &Limits,
    ) -> Result<Self, BitmapError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        Self::from_encoded_with_limits(&data, decoder, limits).inspect(|file| {
            tracing::debug!(
                path = %path.display(),
                width = file.bitmap.width(),
                height = file.bitmap.height(),
                "image loaded"
            );
        })
    }

    /// Decode in-memory image bytes with `decoder`.
    pub fn from_encoded(data: &[u8], decoder: &dyn ImageDecoder) -> Result<Self, BitmapError> {
        Self::from_encoded_with_limits(data, decoder, &Limits::default())
    }

    pub fn from_encoded_with_limits(
        data: &[u8],
        decoder: &dyn ImageDecoder,
        limits: &Limits,
    ) -> Result<Self, BitmapError> {
        let bitmap = decoder
            .decode_argb(data)?
            .into_bitmap_with_limits(limits)?;
        Ok(Self { bitmap })
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    pub fn into_bitmap(self) -> Bitmap {
        self.bitmap
    }

    /// Write the bitmap to `path` as 32-bit (`alpha`) or 24-bit BMP,
    /// replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>, alpha: bool) -> Result<(), BitmapError> {
        let path = path.as_ref();
        let file = fs::File::create(path)?;
        EncodeRequest::bmp()
            .with_alpha(alpha)
            .write_to(&self.bitmap, BufWriter::new(file), enough::Unstoppable)?;
        tracing::debug!(
            path = %path.display(),
            width = self.bitmap.width(),
            height = self.bitmap.height(),
            bits_per_pixel = if alpha { 32 } else { 24 },
            "image saved"
        );
        Ok(())
    }
}

impl From<Bitmap> for BmpFile {
    fn from(bitmap: Bitmap) -> Self {
        Self { bitmap }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgbImage, BmpDecoder, Pixel};

    struct Failing;

    /// Claims a 4x4 solid image, whatever the input.
    struct Solid;

    impl ImageDecoder for Solid {
        fn decode_argb(&self, _data: &[u8]) -> Result<ArgbImage, BitmapError> {
            Ok(ArgbImage {
                width: 4,
                height: 4,
                pixels: vec![0xFF11_2233; 16],
            })
        }
    }

    impl ImageDecoder for Failing {
        fn decode_argb(&self, _data: &[u8]) -> Result<ArgbImage, BitmapError> {
            Err(BitmapError::Decode("not an image".into()))
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("zenbmp-{}-{name}", std::process::id()))
    }

    #[test]
    fn save_and_open() {
        let mut bmp = Bitmap::new(3, 3).unwrap();
        bmp.set(1, 2, Pixel::argb(128, 10, 20, 30));
        let file = BmpFile::from_bitmap(&bmp);

        let path = temp_path("save_and_open.bmp");
        file.save(&path, true).unwrap();
        let back = BmpFile::open(&path, &BmpDecoder::default()).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(back.bitmap(), &bmp);
    }

    #[test]
    fn from_bitmap_copies() {
        let bmp = Bitmap::new(2, 2).unwrap();
        let mut file = BmpFile::from_bitmap(&bmp);
        file.bitmap_mut().set_color(0, 0, (255, 0, 255));
        assert_eq!(bmp.get(0, 0), Pixel::BLACK);
        assert_eq!(file.bitmap().get(0, 0), Pixel::rgb(255, 0, 255));
    }

    #[test]
    fn open_missing_is_io_error() {
        let err = BmpFile::open(temp_path("does-not-exist.bmp"), &BmpDecoder::default()).unwrap_err();
        assert!(matches!(err, BitmapError::Io(_)));
    }

    #[test]
    fn decoder_failure_propagates() {
        assert!(matches!(
            BmpFile::from_encoded(b"whatever", &Failing),
            Err(BitmapError::Decode(_))
        ));
    }

    #[test]
    fn external_decoder_output_is_limited() {
        let limits = Limits {
            max_width: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            BmpFile::from_encoded_with_limits(b"", &Solid, &limits),
            Err(BitmapError::LimitExceeded(_))
        ));

        let path = temp_path("limited.bin");
        fs::write(&path, b"anything").unwrap();
        let refused = BmpFile::open_with_limits(&path, &Solid, &limits);
        let accepted = BmpFile::open(&path, &Solid);
        let _ = fs::remove_file(&path);

        assert!(matches!(refused, Err(BitmapError::LimitExceeded(_))));
        assert_eq!(accepted.unwrap().bitmap().get_argb(3, 3), 0xFF11_2233);
    }
}
