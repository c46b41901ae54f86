use rayon::prelude::*;

use digitizer_image::{Image, Rgb};

use crate::error::FilterError;
use crate::mode::ColorFilterMode;
use crate::pixel::pixel_to_zero_to_one_or_minus_one;

/// Compute the histogram of normalized pixel values under `mode`.
///
/// Used to show the distribution of values behind a threshold band. Bin `i`
/// covers `[i / num_bins, (i + 1) / num_bins)`, with 1.0 going to the last
/// bin. Pixels without a value under `mode` are not counted.
///
/// # Arguments
///
/// * `src` - The input image with RGB or RGBA channels.
/// * `mode` - The color filter mode.
/// * `background` - The background reference color.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if `num_bins` is zero or the image has fewer than 3 channels.
///
/// # Example
///
/// ```
/// use digitizer_image::{Image, ImageSize, Rgb};
/// use digitizer_filter::{histogram, ColorFilterMode};
///
/// let image = Image::<u8, 3>::new(
///     ImageSize { width: 3, height: 1 },
///     vec![0, 0, 0, 128, 0, 0, 255, 0, 0],
/// ).unwrap();
///
/// let hist = histogram(&image, ColorFilterMode::Red, Rgb::WHITE, 2).unwrap();
/// assert_eq!(hist, vec![1, 2]);
/// ```
pub fn histogram<const C: usize>(
    src: &Image<u8, C>,
    mode: ColorFilterMode,
    background: Rgb,
    num_bins: usize,
) -> Result<Vec<usize>, FilterError> {
    if num_bins == 0 {
        return Err(FilterError::InvalidHistogramBins(num_bins));
    }

    if C < 3 {
        return Err(FilterError::InvalidChannels(C));
    }

    let counts = src
        .as_slice()
        .par_chunks_exact(C)
        .fold(
            || vec![0usize; num_bins],
            |mut local, px| {
                if let Some(pixel) = Rgb::from_pixel(px) {
                    let s = pixel_to_zero_to_one_or_minus_one(mode, pixel, background);
                    if s >= 0.0 {
                        let idx = ((s * num_bins as f64) as usize).min(num_bins - 1);
                        local[idx] += 1;
                    }
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                for (i, val) in b.iter().enumerate() {
                    a[i] += val;
                }
                a
            },
        );

    Ok(counts)
}
