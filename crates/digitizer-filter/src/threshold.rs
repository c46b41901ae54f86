use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Inclusive band `[low, high]` of normalized values classified as foreground.
///
/// Both ends lie in `[0, 1]` and `low <= high`; the constructor enforces this,
/// so every band the engine sees is valid.
///
/// # Examples
///
/// ```
/// use digitizer_filter::ThresholdBand;
///
/// let band = ThresholdBand::new(0.0, 0.1).unwrap();
/// assert!(band.contains(0.1));
/// assert!(!band.contains(0.2));
/// assert!(ThresholdBand::new(0.6, 0.4).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct ThresholdBand {
    low: f64,
    high: f64,
}

impl ThresholdBand {
    /// The band covering every defined value.
    pub const FULL: ThresholdBand = ThresholdBand::new_unchecked(0.0, 1.0);

    /// Create a band.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidThresholdBand`] if either end is outside
    /// `[0, 1]` (NaN included) or `low > high`.
    pub fn new(low: f64, high: f64) -> Result<Self, FilterError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(low) || !in_unit(high) || low > high {
            return Err(FilterError::InvalidThresholdBand(low, high));
        }
        Ok(Self { low, high })
    }

    /// Build a band from ends known to be valid.
    pub(crate) const fn new_unchecked(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Lower end of the band.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper end of the band.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// True if `s` lies inside the band, ends included.
    pub fn contains(&self, s: f64) -> bool {
        self.low <= s && s <= self.high
    }
}

impl Default for ThresholdBand {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<(f64, f64)> for ThresholdBand {
    type Error = FilterError;

    fn try_from((low, high): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl From<ThresholdBand> for (f64, f64) {
    fn from(band: ThresholdBand) -> Self {
        (band.low, band.high)
    }
}
