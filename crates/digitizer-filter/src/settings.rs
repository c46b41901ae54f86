use serde::{Deserialize, Serialize};

use digitizer_image::{Image, Rgb};

use crate::error::FilterError;
use crate::filter::filter_image;
use crate::mode::ColorFilterMode;
use crate::pixel::zero_to_one_to_value;
use crate::threshold::ThresholdBand;

const CHANNEL_DEFAULT: ThresholdBand = ThresholdBand::new_unchecked(0.0, 0.5);
const HUE_DEFAULT: ThresholdBand = ThresholdBand::new_unchecked(0.5, 0.7);
const SATURATION_DEFAULT: ThresholdBand = ThresholdBand::new_unchecked(0.5, 1.0);
const FOREGROUND_DEFAULT: ThresholdBand = ThresholdBand::new_unchecked(0.1, 1.0);

/// Color filter configuration as kept by a document.
///
/// Holds the active mode and a remembered band for every mode, so switching
/// modes back and forth keeps each mode's thresholds.
///
/// # Example
///
/// ```
/// use digitizer_filter::{ColorFilterMode, ColorFilterSettings, ThresholdBand};
///
/// let mut settings = ColorFilterSettings::default();
/// settings.mode = ColorFilterMode::Hue;
/// settings.set_band(ColorFilterMode::Hue, ThresholdBand::new(0.0, 0.1).unwrap());
///
/// assert_eq!(settings.active_band().high(), 0.1);
/// assert_eq!(settings.band_values(ColorFilterMode::Hue), (0, 36));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorFilterSettings {
    /// The active mode.
    pub mode: ColorFilterMode,
    red: ThresholdBand,
    green: ThresholdBand,
    blue: ThresholdBand,
    hue: ThresholdBand,
    saturation: ThresholdBand,
    value: ThresholdBand,
    gray: ThresholdBand,
    foreground: ThresholdBand,
}

impl Default for ColorFilterSettings {
    fn default() -> Self {
        Self {
            mode: ColorFilterMode::default(),
            red: CHANNEL_DEFAULT,
            green: CHANNEL_DEFAULT,
            blue: CHANNEL_DEFAULT,
            hue: HUE_DEFAULT,
            saturation: SATURATION_DEFAULT,
            value: CHANNEL_DEFAULT,
            gray: CHANNEL_DEFAULT,
            foreground: FOREGROUND_DEFAULT,
        }
    }
}

impl ColorFilterSettings {
    /// Band remembered for `mode`.
    pub fn band(&self, mode: ColorFilterMode) -> ThresholdBand {
        match mode {
            ColorFilterMode::Red => self.red,
            ColorFilterMode::Green => self.green,
            ColorFilterMode::Blue => self.blue,
            ColorFilterMode::Hue => self.hue,
            ColorFilterMode::Saturation => self.saturation,
            ColorFilterMode::Value => self.value,
            ColorFilterMode::Gray => self.gray,
            ColorFilterMode::Foreground => self.foreground,
        }
    }

    /// Replace the band remembered for `mode`.
    pub fn set_band(&mut self, mode: ColorFilterMode, band: ThresholdBand) {
        let slot = match mode {
            ColorFilterMode::Red => &mut self.red,
            ColorFilterMode::Green => &mut self.green,
            ColorFilterMode::Blue => &mut self.blue,
            ColorFilterMode::Hue => &mut self.hue,
            ColorFilterMode::Saturation => &mut self.saturation,
            ColorFilterMode::Value => &mut self.value,
            ColorFilterMode::Gray => &mut self.gray,
            ColorFilterMode::Foreground => &mut self.foreground,
        };
        *slot = band;
    }

    /// Band of the active mode.
    pub fn active_band(&self) -> ThresholdBand {
        self.band(self.mode)
    }

    /// Ends of the band for `mode` in that mode's displayable units.
    pub fn band_values(&self, mode: ColorFilterMode) -> (i32, i32) {
        let band = self.band(mode);
        (
            zero_to_one_to_value(mode, band.low()),
            zero_to_one_to_value(mode, band.high()),
        )
    }

    /// Filter `original` into `filtered` with the active mode and band.
    ///
    /// # Errors
    ///
    /// See [`filter_image`].
    pub fn apply<const C: usize>(
        &self,
        original: &Image<u8, C>,
        filtered: &mut Image<u8, C>,
        background: Rgb,
    ) -> Result<(), FilterError> {
        filter_image(original, filtered, self.mode, &self.active_band(), background)
    }
}
