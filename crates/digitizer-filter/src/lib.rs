#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// per-pixel color space math.
pub mod color;

/// error types for the filter engine.
pub mod error;

/// whole image filtering.
pub mod filter;

/// histogram of normalized pixel values.
pub mod histogram;

/// background color inference from image margins.
pub mod margin;

/// color filter modes and their value ranges.
pub mod mode;

/// module containing parallelization utilities.
pub mod parallel;

/// single pixel classification.
pub mod pixel;

/// persisted color filter configuration.
pub mod settings;

/// threshold band type.
pub mod threshold;

pub use crate::error::FilterError;
pub use crate::filter::{
    filter_image, filter_image_rows, filter_image_with, filter_mask, BACKGROUND_COLOR,
    FOREGROUND_COLOR,
};
pub use crate::histogram::histogram;
pub use crate::margin::{color_compare, margin_color, COLOR_CHANNEL_TOLERANCE};
pub use crate::mode::ColorFilterMode;
pub use crate::parallel::ExecutionStrategy;
pub use crate::pixel::{
    pixel_filtered_is_on, pixel_to_zero_to_one_or_minus_one, pixel_unfiltered_is_on,
    value_to_zero_to_one, zero_to_one_to_value, UNDEFINED_VALUE,
};
pub use crate::settings::ColorFilterSettings;
pub use crate::threshold::ThresholdBand;
