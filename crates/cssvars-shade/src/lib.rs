//! Per-nibble shading for `#RRGGBB` hex colors.
//!
//! This crate lightens and darkens six-digit hex colors by adding or
//! subtracting a "power" from every hex digit independently. Each digit
//! saturates at `0` and `F`, so the operation never wraps.
//!
//! This is deliberately flat arithmetic: there is no RGB decoding, no HSL
//! conversion and no gamut mapping. `#808080` lightened by `2` is `#A2A2A2`,
//! not `#828282`, because the low digit of every channel moves too.
//!
//! # Example
//!
//! ```rust
//! use cssvars_shade::{darken, lighten, shade_from};
//!
//! assert_eq!(lighten("#000000", 20).unwrap(), "#FFFFFF");
//! assert_eq!(darken("#ffffff", 20).unwrap(), "#000000");
//!
//! // Signed entry point: negative darkens, positive lightens, zero is identity.
//! assert_eq!(shade_from("#808080", -2).unwrap(), "#606060");
//! assert_eq!(shade_from("#808080", 2).unwrap(), "#A2A2A2");
//! assert_eq!(shade_from("#abcdef", 0).unwrap(), "#abcdef");
//! ```
//!
//! # Input Format
//!
//! A color is one marker character (normally `#`) followed by exactly six hex
//! digits. Digits are read case-insensitively and always written back in
//! uppercase. The marker is preserved as given.
//!
//! Anything else is rejected with a [`ShadeError`]; shading never produces a
//! malformed digit.

use std::fmt;
use std::str::FromStr;

/// Number of hex digits in a color, excluding the marker.
pub const HEX_DIGITS: usize = 6;

/// Highest value a single hex digit can hold.
pub const NIBBLE_MAX: u8 = 0xF;

const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Error returned when a string is not a marker followed by six hex digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShadeError {
    /// The input was empty (no marker, no digits).
    Empty,
    /// The input did not have exactly six characters after the marker.
    WrongLength {
        /// Number of characters found after the marker.
        len: usize,
    },
    /// A character after the marker is not a hex digit.
    InvalidDigit {
        /// The offending character.
        digit: char,
        /// Character index within the full input (the marker is index 0).
        position: usize,
    },
}

impl fmt::Display for ShadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadeError::Empty => write!(f, "empty color value"),
            ShadeError::WrongLength { len } => write!(
                f,
                "expected {} hex digits after the marker, found {}",
                HEX_DIGITS, len
            ),
            ShadeError::InvalidDigit { digit, position } => {
                write!(f, "invalid hex digit '{}' at position {}", digit, position)
            }
        }
    }
}

impl std::error::Error for ShadeError {}

/// A parsed six-digit hex color.
///
/// Holds the marker character and one value in `0..=15` per digit. Parse once
/// with [`str::parse`] and shade as often as needed without re-validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    marker: char,
    nibbles: [u8; HEX_DIGITS],
}

impl HexColor {
    /// Builds a color from raw digit values, clamping each to `0..=15`.
    pub fn from_nibbles(marker: char, nibbles: [u8; HEX_DIGITS]) -> Self {
        Self {
            marker,
            nibbles: nibbles.map(|n| n.min(NIBBLE_MAX)),
        }
    }

    /// The marker character that precedes the digits.
    pub fn marker(&self) -> char {
        self.marker
    }

    /// Digit values in order, each in `0..=15`.
    pub fn nibbles(&self) -> [u8; HEX_DIGITS] {
        self.nibbles
    }

    /// Adds `power` to every digit, saturating at `F`.
    pub fn lighten(self, power: u32) -> Self {
        self.map(|n| (u32::from(n).saturating_add(power)).min(u32::from(NIBBLE_MAX)) as u8)
    }

    /// Subtracts `power` from every digit, saturating at `0`.
    pub fn darken(self, power: u32) -> Self {
        self.map(|n| u32::from(n).saturating_sub(power) as u8)
    }

    /// Signed shading: negative darkens, positive lightens, zero is identity.
    pub fn shade(self, power: i32) -> Self {
        match power {
            p if p < 0 => self.darken(p.unsigned_abs()),
            p if p > 0 => self.lighten(p.unsigned_abs()),
            _ => self,
        }
    }

    fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            marker: self.marker,
            nibbles: self.nibbles.map(f),
        }
    }
}

impl FromStr for HexColor {
    type Err = ShadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let marker = chars.next().ok_or(ShadeError::Empty)?;
        let digits: Vec<char> = chars.collect();

        if digits.len() != HEX_DIGITS {
            return Err(ShadeError::WrongLength { len: digits.len() });
        }

        let mut nibbles = [0u8; HEX_DIGITS];
        for (i, digit) in digits.into_iter().enumerate() {
            nibbles[i] = digit
                .to_digit(16)
                .ok_or(ShadeError::InvalidDigit {
                    digit,
                    position: i + 1,
                })? as u8;
        }

        Ok(Self { marker, nibbles })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker)?;
        for n in self.nibbles {
            write!(f, "{}", UPPER_DIGITS[usize::from(n)] as char)?;
        }
        Ok(())
    }
}

/// Lightens `hex` by adding `power` to each digit, clamped at `F`.
pub fn lighten(hex: &str, power: u32) -> Result<String, ShadeError> {
    Ok(hex.parse::<HexColor>()?.lighten(power).to_string())
}

/// Darkens `hex` by subtracting `power` from each digit, clamped at `0`.
pub fn darken(hex: &str, power: u32) -> Result<String, ShadeError> {
    Ok(hex.parse::<HexColor>()?.darken(power).to_string())
}

/// Shades `hex` by a signed power.
///
/// - `power < 0`: [`darken`] by `|power|`
/// - `power > 0`: [`lighten`] by `power`
/// - `power == 0`: returns `hex` exactly as given (case preserved)
///
/// The input is validated in all three cases.
pub fn shade_from(hex: &str, power: i32) -> Result<String, ShadeError> {
    let color = hex.parse::<HexColor>()?;
    if power == 0 {
        return Ok(hex.to_string());
    }
    Ok(color.shade(power).to_string())
}
