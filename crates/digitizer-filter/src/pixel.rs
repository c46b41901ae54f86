use digitizer_image::{Image, Rgb};

use crate::color::{self, MAX_RGB_DISTANCE};
use crate::filter::{BACKGROUND_COLOR, FOREGROUND_COLOR};
use crate::mode::ColorFilterMode;
use crate::threshold::ThresholdBand;

/// Sentinel returned when a pixel has no value under a mode, like the hue of
/// a gray pixel.
pub const UNDEFINED_VALUE: f64 = -1.0;

/// Map a pixel to a scalar in `[0, 1]` under `mode`.
///
/// Returns [`UNDEFINED_VALUE`] when the mapping does not exist for this pixel,
/// which only happens for [`ColorFilterMode::Hue`] on achromatic pixels.
/// The `background` color is only read by [`ColorFilterMode::Foreground`].
///
/// # Example
///
/// ```
/// use digitizer_image::Rgb;
/// use digitizer_filter::{pixel_to_zero_to_one_or_minus_one, ColorFilterMode};
///
/// let bg = Rgb::WHITE;
/// let s = pixel_to_zero_to_one_or_minus_one(ColorFilterMode::Red, Rgb::new(51, 0, 0), bg);
/// assert_eq!(s, 0.2);
///
/// let gray = Rgb::new(40, 40, 40);
/// assert_eq!(pixel_to_zero_to_one_or_minus_one(ColorFilterMode::Hue, gray, bg), -1.0);
/// ```
pub fn pixel_to_zero_to_one_or_minus_one(
    mode: ColorFilterMode,
    pixel: Rgb,
    background: Rgb,
) -> f64 {
    match mode {
        ColorFilterMode::Red => pixel.r as f64 / 255.0,
        ColorFilterMode::Green => pixel.g as f64 / 255.0,
        ColorFilterMode::Blue => pixel.b as f64 / 255.0,
        ColorFilterMode::Gray => color::luminance(pixel) / 255.0,
        ColorFilterMode::Hue => match color::hsv_from_rgb(pixel).h {
            Some(h) => h / 360.0,
            None => UNDEFINED_VALUE,
        },
        ColorFilterMode::Saturation => color::hsv_from_rgb(pixel).s,
        ColorFilterMode::Value => color::hsv_from_rgb(pixel).v,
        ColorFilterMode::Foreground => {
            (color::rgb_distance(pixel, background) / MAX_RGB_DISTANCE).min(1.0)
        }
    }
}

/// Convert a normalized value back into the displayable raw value of `mode`.
///
/// Inverse of [`pixel_to_zero_to_one_or_minus_one`]: channel values for the
/// byte-like modes, degrees for hue, percent for foreground. `s` is clamped to
/// `[0, 1]` and the result is rounded to the nearest integer.
///
/// # Example
///
/// ```
/// use digitizer_filter::{zero_to_one_to_value, ColorFilterMode};
///
/// assert_eq!(zero_to_one_to_value(ColorFilterMode::Gray, 0.5), 128);
/// assert_eq!(zero_to_one_to_value(ColorFilterMode::Hue, 0.5), 180);
/// assert_eq!(zero_to_one_to_value(ColorFilterMode::Foreground, 0.25), 25);
/// ```
pub fn zero_to_one_to_value(mode: ColorFilterMode, s: f64) -> i32 {
    let (min, max) = mode.value_range();
    let s = s.clamp(0.0, 1.0);
    (min as f64 + s * (max - min) as f64).round() as i32
}

/// Convert a displayable raw value of `mode` into its normalized form.
///
/// Values outside the mode's range are clamped.
pub fn value_to_zero_to_one(mode: ColorFilterMode, value: i32) -> f64 {
    let (min, max) = mode.value_range();
    ((value - min) as f64 / (max - min) as f64).clamp(0.0, 1.0)
}

/// Return true if the unfiltered `pixel` falls inside `band` under `mode`.
///
/// A pixel without a value under `mode` is always off.
pub fn pixel_unfiltered_is_on(
    mode: ColorFilterMode,
    pixel: Rgb,
    background: Rgb,
    band: &ThresholdBand,
) -> bool {
    let s = pixel_to_zero_to_one_or_minus_one(mode, pixel, background);
    s >= 0.0 && band.contains(s)
}

/// Luminance separating the foreground and background encodings of a
/// filtered image.
const FILTERED_ON_LIMIT: f64 =
    (BACKGROUND_COLOR.r as f64 + FOREGROUND_COLOR.r as f64) / 2.0;

/// Return true if the pixel `(x, y)` of a filtered image is on.
///
/// The pixel is compared against the foreground encoding written by
/// [`crate::filter_image`]: anything darker than halfway between the two
/// encodings counts as on. Single channel masks from [`crate::filter_mask`]
/// are read as gray. Pixels outside the image are off.
pub fn pixel_filtered_is_on<const C: usize>(filtered: &Image<u8, C>, x: usize, y: usize) -> bool {
    let Some(pixel) = filtered.pixel(x, y) else {
        return false;
    };

    let luminance = match Rgb::from_pixel(pixel) {
        Some(c) => Some(color::luminance(c)),
        None => pixel.first().copied().map(f64::from),
    };

    luminance.is_some_and(|l| l < FILTERED_ON_LIMIT)
}
