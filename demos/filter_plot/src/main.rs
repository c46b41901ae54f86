use argh::FromArgs;

use digitizer::filter::{
    filter_image_with, histogram, margin_color, pixel_filtered_is_on, zero_to_one_to_value,
    ColorFilterMode, ExecutionStrategy, ThresholdBand, BACKGROUND_COLOR,
};
use digitizer::image::{Image, ImageSize, Rgb};

#[derive(FromArgs)]
/// Filter a synthetic scanned plot and print the result as text
struct Args {
    /// width of the generated plot
    #[argh(option, default = "72")]
    width: usize,

    /// height of the generated plot
    #[argh(option, default = "24")]
    height: usize,

    /// color filter mode: red, green, blue, hue, saturation, value, gray or foreground
    #[argh(option, short = 'm', default = "ColorFilterMode::Foreground")]
    mode: ColorFilterMode,

    /// lower end of the threshold band in [0, 1]
    #[argh(option, short = 'l', default = "0.3")]
    low: f64,

    /// upper end of the threshold band in [0, 1]
    #[argh(option, short = 'u', default = "1.0")]
    high: f64,

    /// background color as hex, e.g. `0xf6f4ee`; inferred from the margin if omitted
    #[argh(option, short = 'b', from_str_fn(parse_color))]
    background: Option<Rgb>,

    /// run on the current thread only
    #[argh(switch, short = 's')]
    serial: bool,
}

fn parse_color(value: &str) -> Result<Rgb, String> {
    let hex = value.trim_start_matches('#').trim_start_matches("0x");
    u32::from_str_radix(hex, 16)
        .map(Rgb::from_argb32)
        .map_err(|e| format!("invalid color {value}: {e}"))
}

/// Off-white paper with a gray grid, dark axes and a red curve.
fn synthetic_plot(size: ImageSize) -> Image<u8, 3> {
    let ImageSize { width, height } = size;
    let curve_y = |x: usize| {
        let t = x as f64 / width.max(1) as f64;
        ((1.0 - t * t) * (height as f64 - 4.0)) as usize + 1
    };

    Image::from_fn(size, |x, y| {
        if x == 2 || y + 3 == height {
            [25, 25, 30]
        } else if curve_y(x) == y {
            [200, 40, 35]
        } else if x % 12 == 0 || y % 6 == 0 {
            [200, 200, 200]
        } else {
            [246, 244, 238]
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let image = synthetic_plot(size);

    // the border is paper in any realistic scan
    let background = match args.background {
        Some(color) => color,
        None if args.mode.uses_background() => {
            margin_color(&image).ok_or("the plot must not be empty")?
        }
        None => BACKGROUND_COLOR,
    };
    log::info!("background color {background}");

    let band = ThresholdBand::new(args.low, args.high)?;
    log::info!(
        "{} band [{}, {}]",
        args.mode,
        zero_to_one_to_value(args.mode, band.low()),
        zero_to_one_to_value(args.mode, band.high())
    );

    let strategy = if args.serial {
        ExecutionStrategy::Serial
    } else {
        ExecutionStrategy::ParallelRows
    };

    let mut filtered = Image::<u8, 3>::from_size_val(size, 0)?;
    filter_image_with(strategy, &image, &mut filtered, args.mode, &band, background)?;

    let mut on = 0usize;
    for y in 0..filtered.rows() {
        let row: String = (0..filtered.cols())
            .map(|x| {
                if pixel_filtered_is_on(&filtered, x, y) {
                    on += 1;
                    '#'
                } else {
                    '.'
                }
            })
            .collect();
        println!("{row}");
    }

    let hist = histogram(&image, args.mode, background, 10)?;
    log::info!("histogram of {} values: {hist:?}", args.mode);
    println!("{on} of {} pixels are foreground", size.area());

    Ok(())
}
