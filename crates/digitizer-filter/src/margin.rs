use log::{debug, trace};

use digitizer_image::{Image, ImageSize, Rgb};

/// Largest per-channel difference for two colors to still compare equal.
///
/// Absorbs scanner and compression noise on otherwise uniform paper.
pub const COLOR_CHANNEL_TOLERANCE: u8 = 8;

/// Return true if two colors are close enough to be considered the same.
///
/// Every channel may differ by at most [`COLOR_CHANNEL_TOLERANCE`].
///
/// # Example
///
/// ```
/// use digitizer_image::Rgb;
/// use digitizer_filter::color_compare;
///
/// assert!(color_compare(Rgb::new(250, 250, 250), Rgb::new(255, 252, 247)));
/// assert!(!color_compare(Rgb::WHITE, Rgb::new(255, 255, 200)));
/// ```
pub fn color_compare(rgb1: Rgb, rgb2: Rgb) -> bool {
    rgb1.r.abs_diff(rgb2.r) <= COLOR_CHANNEL_TOLERANCE
        && rgb1.g.abs_diff(rgb2.g) <= COLOR_CHANNEL_TOLERANCE
        && rgb1.b.abs_diff(rgb2.b) <= COLOR_CHANNEL_TOLERANCE
}

/// Number of border pixels matching a representative color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ColorCount {
    color: Rgb,
    count: usize,
}

/// Increment the entry matching `pixel`, or append a new one.
///
/// Entries keep insertion order so ties resolve to the earliest color.
fn merge_pixel_into_color_counts(pixel: Rgb, counts: &mut Vec<ColorCount>) {
    match counts.iter_mut().find(|e| color_compare(e.color, pixel)) {
        Some(entry) => entry.count += 1,
        None => counts.push(ColorCount {
            color: pixel,
            count: 1,
        }),
    }
}

/// Coordinates of the one pixel wide border, each visited exactly once.
///
/// Order: top row, bottom row, then the left and right columns without their
/// corners, each left to right or top to bottom.
fn border_coordinates(size: ImageSize) -> impl Iterator<Item = (usize, usize)> {
    let ImageSize { width, height } = size;
    let inner_rows = 1..height.saturating_sub(1);

    let top = (0..width).map(|x| (x, 0));
    let bottom = (0..width)
        .filter(move |_| height > 1)
        .map(move |x| (x, height - 1));
    let left = inner_rows.clone().map(|y| (0, y));
    let right = inner_rows
        .filter(move |_| width > 1)
        .map(move |y| (width - 1, y));

    top.chain(bottom).chain(left).chain(right)
}

/// Identify the margin color of the image.
///
/// The margin color is the most common color in the four margins. For speed,
/// only the pixels of the outer border are examined, which stands in for the
/// whole margin area as long as the paper dominates the border.
///
/// Colors are grouped with [`color_compare`]; when two groups have the same
/// count the one seen first while scanning wins.
///
/// # Returns
///
/// The representative color of the largest group, or `None` if the image is
/// empty or has fewer than three channels.
///
/// # Example
///
/// ```
/// use digitizer_image::{Image, ImageSize, Rgb};
/// use digitizer_filter::margin_color;
///
/// let image = Image::<u8, 3>::from_fn(ImageSize { width: 3, height: 3 }, |x, y| {
///     if (x, y) == (1, 1) { [0, 0, 0] } else { [255, 255, 255] }
/// });
///
/// assert_eq!(margin_color(&image), Some(Rgb::WHITE));
/// ```
pub fn margin_color<const C: usize>(image: &Image<u8, C>) -> Option<Rgb> {
    if image.is_empty() || C < 3 {
        return None;
    }

    let mut counts = Vec::new();
    let mut visited = 0usize;
    for (x, y) in border_coordinates(image.size()) {
        if let Some(pixel) = image.pixel(x, y).and_then(Rgb::from_pixel) {
            merge_pixel_into_color_counts(pixel, &mut counts);
            visited += 1;
        }
    }
    trace!("margin scan found {} distinct colors", counts.len());

    let mut best: Option<ColorCount> = None;
    for entry in counts {
        if best.map_or(true, |b| entry.count > b.count) {
            best = Some(entry);
        }
    }

    let best = best?;
    debug!(
        "margin color {} ({} of {} border pixels)",
        best.color, best.count, visited
    );
    Some(best.color)
}
