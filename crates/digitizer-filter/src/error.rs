use digitizer_image::ImageError;

/// An error type for the filter engine.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The threshold band is not ordered or leaves `[0, 1]`.
    #[error("invalid threshold band [{0}, {1}]: expected 0 <= low <= high <= 1")]
    InvalidThresholdBand(f64, f64),

    /// The image does not carry red, green and blue channels.
    #[error("expected an image with at least 3 channels, got {0}")]
    InvalidChannels(usize),

    /// The requested histogram bin count is invalid.
    #[error("invalid number of histogram bins: {0}")]
    InvalidHistogramBins(usize),

    /// The requested row range does not fit inside the image.
    #[error("row range {0}..{1} is out of bounds for an image with {2} rows")]
    RowRangeOutOfBounds(usize, usize, usize),

    /// An error from parallel execution.
    #[error(transparent)]
    Parallel(#[from] crate::parallel::ParallelError),

    /// An error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}
