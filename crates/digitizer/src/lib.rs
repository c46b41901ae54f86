#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use digitizer_image as image;

#[doc(inline)]
pub use digitizer_filter as filter;
