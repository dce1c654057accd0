use alloc::vec::Vec;

use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;

/// Builder for encoding a [`Bitmap`] as BMP.
///
/// ```
/// use zenbmp::{Bitmap, EncodeRequest, Pixel, Unstoppable};
///
/// let mut bmp = Bitmap::new(2, 2)?;
/// bmp.set(0, 0, Pixel::rgb(255, 0, 0));
/// let bytes = EncodeRequest::bmp().encode(&bmp, Unstoppable)?;
/// assert_eq!(&bytes[0..2], b"BM");
/// assert_eq!(bytes.len(), 54 + 2 * 8);
/// # Ok::<(), zenbmp::BitmapError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeRequest {
    alpha: bool,
}

impl EncodeRequest {
    /// 24-bit BMP; alpha is dropped.
    pub fn bmp() -> Self {
        Self { alpha: false }
    }

    /// 32-bit BMP keeping the alpha channel.
    pub fn bmp_with_alpha() -> Self {
        Self { alpha: true }
    }

    pub fn with_alpha(mut self, alpha: bool) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn alpha(&self) -> bool {
        self.alpha
    }

    pub fn encode(&self, bitmap: &Bitmap, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        crate::bmp::encode(bitmap, self.alpha, &stop)
    }

    /// Encode and write the whole file to `sink`.
    ///
    /// Write errors are returned unchanged as [`BitmapError::Io`].
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(
        &self,
        bitmap: &Bitmap,
        mut sink: W,
        stop: impl Stop,
    ) -> Result<(), BitmapError> {
        let bytes = self.encode(bitmap, stop)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }
}
