use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TintError;

/// 24-bit color, displayed as lowercase `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise inverse (`255 - c`). Applying it twice yields the original color.
    pub const fn inverted(self) -> Self {
        Self { r: 255 - self.r, g: 255 - self.g, b: 255 - self.b }
    }
}

impl FromStr for Rgb {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(TintError::InvalidColor(s.to_owned()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| TintError::InvalidColor(s.to_owned()))
        };

        Ok(Self { r: channel(0..2)?, g: channel(2..4)?, b: channel(4..6)? })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = TintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Invert a hex color string, returning it re-encoded as `#rrggbb`.
pub fn invert_hex(hex: &str) -> Result<String, TintError> {
    let color: Rgb = hex.parse()?;
    Ok(color.inverted().to_string())
}
