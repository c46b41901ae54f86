mod gray;
mod hsv;

pub use gray::luminance;
pub use hsv::{hsv_from_rgb, Hsv};

use digitizer_image::Rgb;

/// Largest possible Euclidean distance between two 8-bit RGB colors.
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7; // sqrt(3 * 255^2)

/// Euclidean distance between two colors in RGB space.
///
/// The result lies in `[0, MAX_RGB_DISTANCE]`.
pub fn rgb_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}
