use serde::{Deserialize, Serialize};

/// Which derived scalar of a pixel drives the threshold test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFilterMode {
    /// Red channel intensity.
    Red,
    /// Green channel intensity.
    Green,
    /// Blue channel intensity.
    Blue,
    /// Hue angle. Undefined for gray pixels.
    Hue,
    /// HSV saturation.
    Saturation,
    /// HSV value, the largest of the three channels.
    #[default]
    Value,
    /// Gray scale luminance.
    Gray,
    /// Euclidean distance from the background color.
    Foreground,
}

impl ColorFilterMode {
    /// Every mode, in declaration order.
    pub const ALL: [ColorFilterMode; 8] = [
        ColorFilterMode::Red,
        ColorFilterMode::Green,
        ColorFilterMode::Blue,
        ColorFilterMode::Hue,
        ColorFilterMode::Saturation,
        ColorFilterMode::Value,
        ColorFilterMode::Gray,
        ColorFilterMode::Foreground,
    ];

    /// Inclusive range of the displayable raw value for this mode.
    ///
    /// Byte-like modes use `0..=255`, hue uses degrees and foreground uses a
    /// percentage of the largest possible color distance.
    pub fn value_range(&self) -> (i32, i32) {
        match self {
            ColorFilterMode::Hue => (0, 360),
            ColorFilterMode::Foreground => (0, 100),
            ColorFilterMode::Red
            | ColorFilterMode::Green
            | ColorFilterMode::Blue
            | ColorFilterMode::Saturation
            | ColorFilterMode::Value
            | ColorFilterMode::Gray => (0, 255),
        }
    }

    /// True if the mode compares against the background reference color.
    pub fn uses_background(&self) -> bool {
        matches!(self, ColorFilterMode::Foreground)
    }
}

impl std::fmt::Display for ColorFilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ColorFilterMode::Red => "red",
            ColorFilterMode::Green => "green",
            ColorFilterMode::Blue => "blue",
            ColorFilterMode::Hue => "hue",
            ColorFilterMode::Saturation => "saturation",
            ColorFilterMode::Value => "value",
            ColorFilterMode::Gray => "gray",
            ColorFilterMode::Foreground => "foreground",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ColorFilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorFilterMode::ALL
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown color filter mode: {s}"))
    }
}
