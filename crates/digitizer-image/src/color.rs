/// An 8-bit RGB color.
///
/// Pixels of 3 channel (RGB) and 4 channel (RGBA) images both convert to and
/// from this type; the alpha channel is not part of the color.
///
/// # Examples
///
/// ```
/// use digitizer_image::Rgb;
///
/// let c = Rgb::from_argb32(0xff10_2030);
/// assert_eq!(c, Rgb::new(0x10, 0x20, 0x30));
/// assert_eq!(c.to_string(), "#102030");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black, `(0, 0, 0)`.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// White, `(255, 255, 255)`.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Read a color from the first three values of a pixel.
    ///
    /// Returns `None` if the pixel has fewer than three channels.
    pub fn from_pixel(pixel: &[u8]) -> Option<Self> {
        match pixel {
            [r, g, b, ..] => Some(Self::new(*r, *g, *b)),
            _ => None,
        }
    }

    /// Write the color into a pixel. Channels past blue are treated as alpha
    /// and set fully opaque.
    pub fn write_to(&self, pixel: &mut [u8]) {
        for (i, dst) in pixel.iter_mut().enumerate() {
            *dst = match i {
                0 => self.r,
                1 => self.g,
                2 => self.b,
                _ => u8::MAX,
            };
        }
    }

    /// Unpack a `0xAARRGGBB` value. The alpha byte is ignored.
    pub const fn from_argb32(argb: u32) -> Self {
        Self::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
