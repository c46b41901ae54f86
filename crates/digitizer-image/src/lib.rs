#![deny(missing_docs)]
//! Image and color types for the plot digitizer.

/// image representation for the color filter.
pub mod image;

/// packed 8-bit rgb colors.
pub mod color;

/// Error types for the image module.
pub mod error;

pub use crate::color::Rgb;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
