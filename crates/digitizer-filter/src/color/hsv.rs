use digitizer_image::Rgb;

/// A color in the HSV model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`. `None` for achromatic colors (R = G = B).
    pub h: Option<f64>,
    /// Saturation in `[0, 1]`.
    pub s: f64,
    /// Value in `[0, 1]`.
    pub v: f64,
}

/// Convert an RGB color to HSV.
///
/// # Returns
///
/// The HSV color with the following components:
///
/// * H: The hue in degrees `[0, 360)`, or `None` when saturation is zero.
/// * S: The saturation in `[0, 1]`.
/// * V: The value in `[0, 1]`.
///
/// # Example
///
/// ```
/// use digitizer_image::Rgb;
/// use digitizer_filter::color::hsv_from_rgb;
///
/// let hsv = hsv_from_rgb(Rgb::new(0, 0, 255));
/// assert_eq!(hsv.h, Some(240.0));
/// assert_eq!(hsv.s, 1.0);
/// assert_eq!(hsv.v, 1.0);
///
/// assert_eq!(hsv_from_rgb(Rgb::new(90, 90, 90)).h, None);
/// ```
pub fn hsv_from_rgb(c: Rgb) -> Hsv {
    // Normalize the input to the range [0, 1]
    let r = c.r as f64 / 255.;
    let g = c.g as f64 / 255.;
    let b = c.b as f64 / 255.;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        None
    } else {
        let h = if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        // Ensure h is in the range [0, 360)
        let h = if h < 0.0 { h + 360.0 } else { h };
        Some(if h >= 360.0 { 0.0 } else { h })
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    Hsv { h, s, v: max }
}
