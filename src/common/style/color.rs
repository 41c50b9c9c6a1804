//! Run colors.
use serde::{Deserialize, Serialize};
use std::fmt;

/// An explicit run color, as stored in `w:color/@w:val`.
///
/// Serialized as its `RRGGBB` hex form, so configuration and reports stay
/// readable.
///
/// ```rust
/// use restyle::common::RGBColor;
///
/// let accent = RGBColor::from_hex("2F5496").unwrap();
/// assert_eq!(accent, RGBColor::new(0x2F, 0x54, 0x96));
/// assert_eq!(accent.to_string(), "#2F5496");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RGBColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGBColor {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RRGGBB`, with or without a leading `#`.
    ///
    /// Word's `auto` (follow the theme) and anything else that is not six hex
    /// digits yields `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        let [_, r, g, b] = value.to_be_bytes();
        Some(Self::new(r, g, b))
    }

    /// The `RRGGBB` form written to `w:color`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for RGBColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}"))
    }
}

impl From<RGBColor> for String {
    fn from(color: RGBColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
