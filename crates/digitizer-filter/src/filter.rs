use std::ops::Range;

use log::debug;

use digitizer_image::{Image, ImageError, Rgb};

use crate::error::FilterError;
use crate::mode::ColorFilterMode;
use crate::parallel::{self, ExecutionStrategy};
use crate::pixel::pixel_unfiltered_is_on;
use crate::threshold::ThresholdBand;

/// Color written for pixels classified as foreground.
pub const FOREGROUND_COLOR: Rgb = Rgb::BLACK;

/// Color written for pixels classified as background.
pub const BACKGROUND_COLOR: Rgb = Rgb::WHITE;

fn check_images<const C1: usize, const C2: usize>(
    src: &Image<u8, C1>,
    dst: &Image<u8, C2>,
) -> Result<(), FilterError> {
    if C1 < 3 {
        return Err(FilterError::InvalidChannels(C1));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    Ok(())
}

/// Classify one source pixel and write the canonical color into `dst_pixel`.
#[inline]
fn binarize_pixel(
    src_pixel: &[u8],
    dst_pixel: &mut [u8],
    mode: ColorFilterMode,
    band: &ThresholdBand,
    background: Rgb,
) {
    let is_on = Rgb::from_pixel(src_pixel)
        .is_some_and(|pixel| pixel_unfiltered_is_on(mode, pixel, background, band));

    if is_on {
        FOREGROUND_COLOR.write_to(dst_pixel);
    } else {
        BACKGROUND_COLOR.write_to(dst_pixel);
    }
}

/// Filter the original image according to the specified filtering parameters.
///
/// Every pixel inside `band` under `mode` becomes [`FOREGROUND_COLOR`], every
/// other pixel [`BACKGROUND_COLOR`]. Alpha channels of the output are opaque.
/// Rows are processed in parallel on the global thread pool.
///
/// # Arguments
///
/// * `original` - The input image with RGB or RGBA channels.
/// * `filtered` - The output image, same size and channels as the input.
/// * `mode` - The color filter mode.
/// * `band` - The normalized values classified as foreground.
/// * `background` - The background reference color.
///
/// # Errors
///
/// Returns an error if the image has fewer than 3 channels or the two images
/// differ in size. An empty image is left untouched.
///
/// # Example
///
/// ```
/// use digitizer_image::{Image, ImageSize, Rgb};
/// use digitizer_filter::{filter_image, margin_color, ColorFilterMode, ThresholdBand};
///
/// let image = Image::<u8, 3>::from_fn(ImageSize { width: 3, height: 3 }, |x, y| {
///     if (x, y) == (1, 1) { [0, 0, 0] } else { [255, 255, 255] }
/// });
/// let background = margin_color(&image).unwrap();
///
/// let mut filtered = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
/// let band = ThresholdBand::new(0.0, 0.1).unwrap();
/// filter_image(&image, &mut filtered, ColorFilterMode::Gray, &band, background).unwrap();
///
/// assert_eq!(filtered.pixel(1, 1), Some(&[0u8, 0, 0][..]));
/// assert_eq!(filtered.pixel(0, 0), Some(&[255u8, 255, 255][..]));
/// ```
pub fn filter_image<const C: usize>(
    original: &Image<u8, C>,
    filtered: &mut Image<u8, C>,
    mode: ColorFilterMode,
    band: &ThresholdBand,
    background: Rgb,
) -> Result<(), FilterError> {
    filter_image_with(
        ExecutionStrategy::default(),
        original,
        filtered,
        mode,
        band,
        background,
    )
}

/// Same as [`filter_image`] with an explicit [`ExecutionStrategy`].
pub fn filter_image_with<const C: usize>(
    strategy: ExecutionStrategy,
    original: &Image<u8, C>,
    filtered: &mut Image<u8, C>,
    mode: ColorFilterMode,
    band: &ThresholdBand,
    background: Rgb,
) -> Result<(), FilterError> {
    check_images(original, filtered)?;

    if mode.uses_background() {
        debug!(
            "filtering {} by {} in [{}, {}] against {}",
            original.size(),
            mode,
            band.low(),
            band.high(),
            background
        );
    } else {
        debug!(
            "filtering {} by {} in [{}, {}]",
            original.size(),
            mode,
            band.low(),
            band.high()
        );
    }

    parallel::iter_rows_with::<u8, C, u8, C>(
        strategy,
        original.as_slice(),
        filtered.as_slice_mut(),
        original.cols(),
        |src_pixel, dst_pixel| binarize_pixel(src_pixel, dst_pixel, mode, band, background),
    )?;

    Ok(())
}

/// Filter only the rows in `rows`, leaving the rest of `filtered` untouched.
///
/// Lets callers split a large image into chunks and stop between them.
///
/// # Errors
///
/// Same as [`filter_image`], plus [`FilterError::RowRangeOutOfBounds`] if the
/// range is reversed or runs past the last row.
///
/// # Example
///
/// ```
/// use digitizer_image::{Image, ImageSize, Rgb};
/// use digitizer_filter::{filter_image_rows, ColorFilterMode, ThresholdBand};
///
/// let image = Image::<u8, 4>::from_size_val(ImageSize { width: 64, height: 48 }, 0).unwrap();
/// let mut filtered = Image::<u8, 4>::from_size_val(image.size(), 0).unwrap();
/// let band = ThresholdBand::new(0.0, 0.5).unwrap();
///
/// let cancelled = false;
/// for start in (0..image.rows()).step_by(16) {
///     if cancelled {
///         break;
///     }
///     let rows = start..(start + 16).min(image.rows());
///     filter_image_rows(&image, &mut filtered, rows, ColorFilterMode::Value, &band, Rgb::WHITE)
///         .unwrap();
/// }
/// ```
pub fn filter_image_rows<const C: usize>(
    original: &Image<u8, C>,
    filtered: &mut Image<u8, C>,
    rows: Range<usize>,
    mode: ColorFilterMode,
    band: &ThresholdBand,
    background: Rgb,
) -> Result<(), FilterError> {
    check_images(original, filtered)?;

    if rows.start > rows.end || rows.end > original.rows() {
        return Err(FilterError::RowRangeOutOfBounds(
            rows.start,
            rows.end,
            original.rows(),
        ));
    }

    let stride = C * original.cols();
    let span = rows.start * stride..rows.end * stride;

    parallel::iter_rows_with::<u8, C, u8, C>(
        ExecutionStrategy::default(),
        &original.as_slice()[span.clone()],
        &mut filtered.as_slice_mut()[span],
        original.cols(),
        |src_pixel, dst_pixel| binarize_pixel(src_pixel, dst_pixel, mode, band, background),
    )?;

    Ok(())
}

/// Write a single channel classification mask.
///
/// The mask shares the encoding of [`filter_image`]: on pixels are 0 and off
/// pixels are 255, so [`crate::pixel_filtered_is_on`] reads either output.
///
/// # Errors
///
/// Returns an error if the image has fewer than 3 channels or the mask size
/// differs from the image size.
pub fn filter_mask<const C: usize>(
    original: &Image<u8, C>,
    mask: &mut Image<u8, 1>,
    mode: ColorFilterMode,
    band: &ThresholdBand,
    background: Rgb,
) -> Result<(), FilterError> {
    check_images(original, mask)?;

    parallel::par_iter_rows(original, mask, |src_pixel, dst_pixel| {
        let is_on = Rgb::from_pixel(src_pixel)
            .is_some_and(|pixel| pixel_unfiltered_is_on(mode, pixel, background, band));
        dst_pixel[0] = if is_on {
            FOREGROUND_COLOR.r
        } else {
            BACKGROUND_COLOR.r
        };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::pixel_filtered_is_on;
    use digitizer_image::ImageSize;
    use rand::Rng;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn random_image<const C: usize>(width: usize, height: usize) -> Image<u8, C> {
        let mut rng = rand::rng();
        Image::from_fn(ImageSize { width, height }, |_, _| {
            std::array::from_fn(|_| rng.random())
        })
    }

    #[test]
    fn center_dot_scenario() -> TestResult {
        let image = Image::<u8, 3>::from_fn(
            ImageSize {
                width: 3,
                height: 3,
            },
            |x, y| {
                if (x, y) == (1, 1) {
                    [0, 0, 0]
                } else {
                    [255, 255, 255]
                }
            },
        );
        let background = crate::margin::margin_color(&image).ok_or("empty image")?;
        assert_eq!(background, Rgb::WHITE);

        let mut filtered = Image::<u8, 3>::from_size_val(image.size(), 7)?;
        let band = ThresholdBand::new(0.0, 0.1)?;
        filter_image(&image, &mut filtered, ColorFilterMode::Gray, &band, background)?;

        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(pixel_filtered_is_on(&filtered, x, y), (x, y) == (1, 1));
            }
        }
        assert_eq!(filtered.pixel(1, 1), Some(&[0u8, 0, 0][..]));
        assert_eq!(filtered.pixel(2, 2), Some(&[255u8, 255, 255][..]));

        Ok(())
    }

    #[test]
    fn uniform_image_gives_uniform_output() -> TestResult {
        let color = [30u8, 140, 90, 255];
        let image = Image::<u8, 4>::from_fn(
            ImageSize {
                width: 5,
                height: 4,
            },
            |_, _| color,
        );
        let background = crate::margin::margin_color(&image).ok_or("empty image")?;
        assert_eq!(background, Rgb::new(30, 140, 90));

        for mode in ColorFilterMode::ALL {
            for band in [ThresholdBand::new(0.0, 0.3)?, ThresholdBand::new(0.3, 1.0)?] {
                let mut filtered = Image::<u8, 4>::from_size_val(image.size(), 0)?;
                filter_image(&image, &mut filtered, mode, &band, background)?;
                let first = filtered.pixel(0, 0).map(|p| p.to_vec());
                assert!(filtered
                    .as_slice()
                    .chunks_exact(4)
                    .all(|p| Some(p.to_vec()) == first));
            }
        }

        Ok(())
    }

    #[test]
    fn output_agrees_with_pixel_classification() -> TestResult {
        let image = random_image::<3>(37, 23);
        let background = Rgb::new(240, 235, 230);

        for mode in ColorFilterMode::ALL {
            let band = ThresholdBand::new(0.2, 0.6)?;
            let mut filtered = Image::<u8, 3>::from_size_val(image.size(), 0)?;
            filter_image(&image, &mut filtered, mode, &band, background)?;

            for y in 0..image.rows() {
                for x in 0..image.cols() {
                    let pixel = image
                        .pixel(x, y)
                        .and_then(Rgb::from_pixel)
                        .ok_or("pixel out of bounds")?;
                    let expected = if pixel_unfiltered_is_on(mode, pixel, background, &band) {
                        FOREGROUND_COLOR
                    } else {
                        BACKGROUND_COLOR
                    };
                    let actual = filtered.pixel(x, y).and_then(Rgb::from_pixel);
                    assert_eq!(actual, Some(expected), "{mode} at ({x}, {y})");
                }
            }
        }

        Ok(())
    }

    #[test]
    fn filtering_binarized_image_is_idempotent() -> TestResult {
        let image = random_image::<4>(16, 9);
        let band = ThresholdBand::new(0.0, 0.5)?;

        let mut once = Image::<u8, 4>::from_size_val(image.size(), 0)?;
        filter_image(&image, &mut once, ColorFilterMode::Value, &band, Rgb::WHITE)?;

        for mode in [
            ColorFilterMode::Value,
            ColorFilterMode::Gray,
            ColorFilterMode::Red,
        ] {
            let mut twice = Image::<u8, 4>::from_size_val(image.size(), 0)?;
            filter_image(&once, &mut twice, mode, &band, Rgb::WHITE)?;
            assert_eq!(once, twice, "{mode}");
        }

        Ok(())
    }

    #[test]
    fn alpha_is_opaque() -> TestResult {
        let image = Image::<u8, 4>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        let mut filtered = Image::<u8, 4>::from_size_val(image.size(), 0)?;
        filter_image(
            &image,
            &mut filtered,
            ColorFilterMode::Value,
            &ThresholdBand::FULL,
            Rgb::WHITE,
        )?;
        assert!(filtered.as_slice().chunks_exact(4).all(|p| p[3] == 255));
        Ok(())
    }

    #[test]
    fn strategies_agree() -> TestResult {
        let image = random_image::<3>(31, 17);
        let band = ThresholdBand::new(0.1, 0.4)?;
        let bg = Rgb::WHITE;

        let mut serial = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        filter_image_with(
            ExecutionStrategy::Serial,
            &image,
            &mut serial,
            ColorFilterMode::Hue,
            &band,
            bg,
        )?;

        for strategy in [ExecutionStrategy::ParallelRows, ExecutionStrategy::Fixed(3)] {
            let mut out = Image::<u8, 3>::from_size_val(image.size(), 0)?;
            filter_image_with(strategy, &image, &mut out, ColorFilterMode::Hue, &band, bg)?;
            assert_eq!(out, serial);
        }

        let mut out = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        let res = filter_image_with(
            ExecutionStrategy::Fixed(0),
            &image,
            &mut out,
            ColorFilterMode::Hue,
            &band,
            bg,
        );
        assert_eq!(
            res,
            Err(FilterError::Parallel(
                parallel::ParallelError::InvalidThreadCount(0)
            ))
        );

        Ok(())
    }

    #[test]
    fn chunked_rows_match_full_image() -> TestResult {
        let image = random_image::<4>(20, 11);
        let band = ThresholdBand::new(0.0, 0.45)?;
        let bg = Rgb::new(250, 250, 250);
        let mode = ColorFilterMode::Foreground;

        let mut full = Image::<u8, 4>::from_size_val(image.size(), 0)?;
        filter_image(&image, &mut full, mode, &band, bg)?;

        let mut chunked = Image::<u8, 4>::from_size_val(image.size(), 0)?;
        for start in (0..image.rows()).step_by(4) {
            let rows = start..(start + 4).min(image.rows());
            filter_image_rows(&image, &mut chunked, rows, mode, &band, bg)?;
        }
        assert_eq!(chunked, full);

        // a partial range leaves the other rows untouched
        let mut partial = Image::<u8, 4>::from_size_val(image.size(), 7)?;
        filter_image_rows(&image, &mut partial, 2..3, mode, &band, bg)?;
        assert_eq!(partial.pixel(0, 1), Some(&[7u8, 7, 7, 7][..]));
        assert_eq!(partial.pixel(0, 2), full.pixel(0, 2));

        assert_eq!(
            filter_image_rows(&image, &mut partial, 5..12, mode, &band, bg),
            Err(FilterError::RowRangeOutOfBounds(5, 12, 11))
        );

        Ok(())
    }

    #[test]
    fn mask_matches_filtered_image() -> TestResult {
        let image = random_image::<3>(13, 8);
        let band = ThresholdBand::new(0.3, 0.9)?;

        let mut filtered = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        filter_image(&image, &mut filtered, ColorFilterMode::Saturation, &band, Rgb::WHITE)?;

        let mut mask = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        filter_mask(&image, &mut mask, ColorFilterMode::Saturation, &band, Rgb::WHITE)?;

        for y in 0..image.rows() {
            for x in 0..image.cols() {
                let on = mask.get([y, x, 0]) == Some(&0);
                assert_eq!(on, pixel_filtered_is_on(&filtered, x, y));
                assert_eq!(on, pixel_filtered_is_on(&mask, x, y));
            }
        }

        Ok(())
    }

    #[test]
    fn background_only_matters_when_mode_uses_it() -> TestResult {
        let image = random_image::<3>(9, 7);
        let band = ThresholdBand::new(0.2, 0.6)?;

        for mode in ColorFilterMode::ALL {
            let mut on_white = Image::<u8, 3>::from_size_val(image.size(), 0)?;
            let mut on_gray = Image::<u8, 3>::from_size_val(image.size(), 0)?;
            filter_image(&image, &mut on_white, mode, &band, Rgb::WHITE)?;
            filter_image(&image, &mut on_gray, mode, &band, Rgb::new(128, 128, 128))?;

            if !mode.uses_background() {
                assert_eq!(on_white, on_gray, "{mode}");
            }
        }

        // white ink is at distance 0 from a white background, far from gray
        let mode = ColorFilterMode::Foreground;
        let white = Image::<u8, 3>::from_size_val([1, 1].into(), 255)?;
        let mut filtered = Image::<u8, 3>::from_size_val(white.size(), 0)?;
        filter_image(&white, &mut filtered, mode, &band, Rgb::WHITE)?;
        assert!(!pixel_filtered_is_on(&filtered, 0, 0));
        filter_image(&white, &mut filtered, mode, &band, Rgb::new(128, 128, 128))?;
        assert!(pixel_filtered_is_on(&filtered, 0, 0));

        Ok(())
    }

    #[test]
    fn mask_center_dot_is_on() -> TestResult {
        let image = Image::<u8, 3>::from_fn([3, 3].into(), |x, y| {
            if (x, y) == (1, 1) {
                [0, 0, 0]
            } else {
                [255, 255, 255]
            }
        });
        let band = ThresholdBand::new(0.0, 0.1)?;

        let mut mask = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        filter_mask(&image, &mut mask, ColorFilterMode::Gray, &band, Rgb::WHITE)?;

        assert_eq!(mask.pixel(1, 1), Some(&[0u8][..]));
        assert!(pixel_filtered_is_on(&mask, 1, 1));
        assert!(!pixel_filtered_is_on(&mask, 0, 0));
        assert!(!pixel_filtered_is_on(&mask, 3, 1));

        Ok(())
    }

    #[test]
    fn invalid_inputs() -> TestResult {
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let image = Image::<u8, 3>::from_size_val(size, 0)?;
        let mut small = Image::<u8, 3>::from_size_val([3, 3].into(), 0)?;
        assert_eq!(
            filter_image(
                &image,
                &mut small,
                ColorFilterMode::Red,
                &ThresholdBand::FULL,
                Rgb::WHITE
            ),
            Err(FilterError::Image(ImageError::InvalidImageSize(4, 3, 3, 3)))
        );

        let gray = Image::<u8, 1>::from_size_val(size, 0)?;
        let mut out = Image::<u8, 1>::from_size_val(size, 0)?;
        assert_eq!(
            filter_image(
                &gray,
                &mut out,
                ColorFilterMode::Red,
                &ThresholdBand::FULL,
                Rgb::WHITE
            ),
            Err(FilterError::InvalidChannels(1))
        );

        let empty = Image::<u8, 3>::from_size_val([0, 0].into(), 0)?;
        let mut empty_out = empty.clone();
        filter_image(
            &empty,
            &mut empty_out,
            ColorFilterMode::Red,
            &ThresholdBand::FULL,
            Rgb::WHITE,
        )?;

        Ok(())
    }
}
