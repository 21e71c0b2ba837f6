//! Hex color values.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("hex color pattern is valid")
});

/// Returns true if `value` is a `#RRGGBB` or `#RRGGBBAA` code.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// A validated `#RRGGBB` or `#RRGGBBAA` color.
///
/// The original spelling is kept as-is, so `"#DEEBF7"` and `"#deebf7"`
/// are different values even though they describe the same color.
///
/// # Example
///
/// ```rust
/// use chromabook::HexColor;
///
/// let c = HexColor::parse("#3182bd").unwrap();
/// assert_eq!(c.rgb(), (0x31, 0x82, 0xbd));
/// assert_eq!(c.alpha(), None);
/// assert!(HexColor::parse("#ZZZZZZ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if is_hex_color(value) {
            Ok(HexColor(value.to_string()))
        } else {
            Err(ValidationError::InvalidColor {
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.channel(0), self.channel(1), self.channel(2))
    }

    /// The alpha channel, present only for 8-digit codes.
    pub fn alpha(&self) -> Option<u8> {
        (self.0.len() == 9).then(|| self.channel(3))
    }

    /// Nearest index in the ANSI 256-color palette.
    ///
    /// Grays map onto the 24-step grayscale ramp, everything else onto
    /// the 6x6x6 color cube. Alpha is ignored.
    pub fn ansi256(&self) -> u8 {
        let (r, g, b) = self.rgb();
        if r == g && g == b {
            return match r {
                0..=7 => 16,
                249..=255 => 231,
                _ => 232 + ((u16::from(r) - 8) * 24 / 247) as u8,
            };
        }
        let scale = |v: u8| (u16::from(v) * 5 / 255) as u8;
        16 + 36 * scale(r) + 6 * scale(g) + scale(b)
    }

    // The pattern guarantees ASCII hex digits at every channel offset.
    fn channel(&self, i: usize) -> u8 {
        let start = 1 + i * 2;
        u8::from_str_radix(&self.0[start..start + 2], 16).unwrap_or(0)
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_hex_color(&value) {
            Ok(HexColor(value))
        } else {
            Err(ValidationError::InvalidColor { value })
        }
    }
}

impl TryFrom<&str> for HexColor {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        HexColor::parse(value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for HexColor {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
