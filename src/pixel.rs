//! ARGB pixel with clamped 8-bit channels.

/// Clamp an integer channel value into `0..=255`.
///
/// Negative values become 0, values above 255 become 255. Never wraps.
#[inline]
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Clamp each channel and pack as `0xAARRGGBB`.
#[inline]
pub fn pack_argb(a: i32, r: i32, g: i32, b: i32) -> u32 {
    (u32::from(clamp_channel(a)) << 24)
        | (u32::from(clamp_channel(r)) << 16)
        | (u32::from(clamp_channel(g)) << 8)
        | u32::from(clamp_channel(b))
}

/// Clamp each channel and pack as `0x00RRGGBB`.
#[inline]
pub fn pack_rgb(r: i32, g: i32, b: i32) -> u32 {
    pack_argb(0, r, g, b)
}

/// One pixel: alpha, red, green and blue, 8 bits each.
///
/// The fields are public. Writing them directly skips clamping, which is
/// harmless since a `u8` cannot leave the channel range; the clamping
/// constructors exist for wider integer input.
///
/// The default pixel is opaque black (`alpha = 255`, all colors 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for Pixel {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Pixel {
    /// Alpha value of a fully opaque pixel; the default for RGB construction.
    pub const OPAQUE: u8 = 255;

    /// Opaque black.
    pub const BLACK: Pixel = Pixel {
        alpha: Self::OPAQUE,
        red: 0,
        green: 0,
        blue: 0,
    };

    /// Opaque pixel from RGB channels, each clamped to `0..=255`.
    pub fn rgb(r: i32, g: i32, b: i32) -> Self {
        Self::argb(i32::from(Self::OPAQUE), r, g, b)
    }

    /// Pixel from ARGB channels, each clamped to `0..=255` independently.
    pub fn argb(a: i32, r: i32, g: i32, b: i32) -> Self {
        Self {
            alpha: clamp_channel(a),
            red: clamp_channel(r),
            green: clamp_channel(g),
            blue: clamp_channel(b),
        }
    }

    /// Unpack a `0xAARRGGBB` value.
    pub const fn from_argb_u32(color: u32) -> Self {
        Self {
            alpha: (color >> 24) as u8,
            red: (color >> 16) as u8,
            green: (color >> 8) as u8,
            blue: color as u8,
        }
    }

    /// Packed `0xAARRGGBB`.
    pub const fn to_argb_u32(self) -> u32 {
        ((self.alpha as u32) << 24)
            | ((self.red as u32) << 16)
            | ((self.green as u32) << 8)
            | self.blue as u32
    }

    /// Packed `0x00RRGGBB`. Alpha bits are always zero.
    pub const fn to_rgb_u32(self) -> u32 {
        self.to_argb_u32() & 0x00FF_FFFF
    }

    /// Overwrite this pixel's color.
    ///
    /// [`ColorInput::Rgb`] keeps the current alpha; the other shapes replace
    /// all four channels.
    pub fn set_color(&mut self, color: impl Into<ColorInput>) {
        *self = match color.into() {
            ColorInput::Packed(argb) => Self::from_argb_u32(argb),
            ColorInput::Rgb(r, g, b) => Self::argb(i32::from(self.alpha), r, g, b),
            ColorInput::Argb(a, r, g, b) => Self::argb(a, r, g, b),
        };
    }
}

/// The accepted shapes of color input.
///
/// Channel values in `Rgb`/`Argb` are clamped to `0..=255` when applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorInput {
    /// Packed `0xAARRGGBB`.
    Packed(u32),
    /// Red, green, blue.
    Rgb(i32, i32, i32),
    /// Alpha, red, green, blue.
    Argb(i32, i32, i32, i32),
}

impl From<u32> for ColorInput {
    fn from(argb: u32) -> Self {
        Self::Packed(argb)
    }
}

impl From<(i32, i32, i32)> for ColorInput {
    fn from((r, g, b): (i32, i32, i32)) -> Self {
        Self::Rgb(r, g, b)
    }
}

impl From<(i32, i32, i32, i32)> for ColorInput {
    fn from((a, r, g, b): (i32, i32, i32, i32)) -> Self {
        Self::Argb(a, r, g, b)
    }
}

impl From<Pixel> for ColorInput {
    fn from(p: Pixel) -> Self {
        Self::Packed(p.to_argb_u32())
    }
}

impl From<ColorInput> for Pixel {
    /// `Rgb` input produces an opaque pixel.
    fn from(color: ColorInput) -> Self {
        let mut p = Pixel::BLACK;
        p.set_color(color);
        p
    }
}

impl From<u32> for Pixel {
    fn from(argb: u32) -> Self {
        Self::from_argb_u32(argb)
    }
}

impl From<Pixel> for u32 {
    fn from(p: Pixel) -> Self {
        p.to_argb_u32()
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGBA8> for Pixel {
    fn from(p: rgb::RGBA8) -> Self {
        Self {
            alpha: p.a,
            red: p.r,
            green: p.g,
            blue: p.b,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGBA8 {
    fn from(p: Pixel) -> Self {
        rgb::RGBA8::new(p.red, p.green, p.blue, p.alpha)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Self {
        Self {
            alpha: Self::OPAQUE,
            red: p.r,
            green: p.g,
            blue: p.b,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB8 {
    fn from(p: Pixel) -> Self {
        rgb::RGB8::new(p.red, p.green, p.blue)
    }
}
