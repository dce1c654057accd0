use alloc::vec::Vec;

use enough::Stop;

use crate::bitmap::Bitmap;
use crate::bmp::BmpPermissiveness;
use crate::error::BitmapError;
use crate::limits::Limits;

/// A decoded image as packed `0xAARRGGBB` values, row-major top-to-bottom.
///
/// This is the hand-off shape between an [`ImageDecoder`] and [`Bitmap`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgbImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl ArgbImage {
    /// Build a [`Bitmap`], checking that `pixels` holds exactly `width * height` values.
    pub fn into_bitmap(self) -> Result<Bitmap, BitmapError> {
        let too_large = |_| BitmapError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        };
        let width = i32::try_from(self.width).map_err(too_large)?;
        let height = i32::try_from(self.height).map_err(too_large)?;
        Bitmap::from_argb(width, height, &self.pixels)
    }

    /// [`into_bitmap`](Self::into_bitmap), refusing images over `limits`.
    pub fn into_bitmap_with_limits(self, limits: &Limits) -> Result<Bitmap, BitmapError> {
        limits.check(self.width, self.height)?;
        self.into_bitmap()
    }
}

impl From<&Bitmap> for ArgbImage {
    fn from(bitmap: &Bitmap) -> Self {
        Self {
            width: bitmap.width(),
            height: bitmap.height(),
            pixels: bitmap.to_argb_vec(),
        }
    }
}

impl TryFrom<ArgbImage> for Bitmap {
    type Error = BitmapError;

    fn try_from(img: ArgbImage) -> Result<Self, Self::Error> {
        img.into_bitmap()
    }
}

/// Turns encoded image bytes into packed ARGB pixels.
///
/// Implement this to plug a general-purpose image library (PNG, JPEG, ...)
/// into [`BmpFile`](crate::BmpFile); report its failures as
/// [`BitmapError::Decode`]. [`BmpDecoder`] is the built-in implementation.
pub trait ImageDecoder {
    fn decode_argb(&self, data: &[u8]) -> Result<ArgbImage, BitmapError>;
}

/// The crate's own BMP reader as an [`ImageDecoder`].
#[derive(Clone, Debug, Default)]
pub struct BmpDecoder {
    pub limits: Option<Limits>,
    pub permissiveness: BmpPermissiveness,
}

impl ImageDecoder for BmpDecoder {
    fn decode_argb(&self, data: &[u8]) -> Result<ArgbImage, BitmapError> {
        let bitmap = crate::bmp::decode(
            data,
            self.limits.as_ref(),
            self.permissiveness,
            &enough::Unstoppable,
        )?;
        Ok(ArgbImage::from(&bitmap))
    }
}

/// Builder for decoding BMP bytes into a [`Bitmap`].
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    /// Reject images that exceed `limits` before allocating.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Bitmap, BitmapError> {
        crate::bmp::decode(self.data, self.limits, self.permissiveness, &stop)
    }
}
