use digitizer_image::Rgb;

/// Define the RGB weights for the grayscale conversion (ITU-R BT.601).
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Luminance of a color using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The result is in the same `[0, 255]` range as the channels.
///
/// # Example
///
/// ```
/// use digitizer_image::Rgb;
/// use digitizer_filter::color::luminance;
///
/// assert_eq!(luminance(Rgb::BLACK), 0.0);
/// assert!((luminance(Rgb::WHITE) - 255.0).abs() < 1e-9);
/// ```
pub fn luminance(c: Rgb) -> f64 {
    RW * c.r as f64 + GW * c.g as f64 + BW * c.b as f64
}
