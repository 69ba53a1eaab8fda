// SPDX-License-Identifier: MIT
//
// Color math: hex parsing, 24-bit escape codes, and linear interpolation.
//
// Single-character variable names (r, g, b, t) are the standard convention
// for color channels and interpolation parameters.
#![allow(clippy::many_single_char_names)]
//
// The comet uses exactly two configured colors, head and tail, and blends
// between them in plain sRGB. Interpolation truncates toward zero so the
// gradient steps match what the terminal receives byte for byte.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A color string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Not exactly six hex digits (an optional leading `#` is allowed).
    #[error("invalid hex color {0:?}: expected six hex digits like 7b87ed")]
    InvalidFormat(String),
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The foreground escape sequence for this color.
    ///
    /// See [`rgb_to_color_code`].
    #[must_use]
    pub fn color_code(self) -> String {
        rgb_to_color_code(self)
    }

    /// Lowercase `rrggbb`, without a leading `#`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

/// Parse a six-digit hex color (`681414`, `#7B87ED`).
///
/// # Errors
///
/// Returns [`ColorError::InvalidFormat`] if the string (after stripping one
/// leading `#`) is not exactly six ASCII hex digits.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let bytes = digits.as_bytes();
    let invalid = || ColorError::InvalidFormat(hex.to_owned());

    if bytes.len() != 6 {
        return Err(invalid());
    }

    let r = parse_hex_byte(&bytes[0..2]).ok_or_else(invalid)?;
    let g = parse_hex_byte(&bytes[2..4]).ok_or_else(invalid)?;
    let b = parse_hex_byte(&bytes[4..6]).ok_or_else(invalid)?;
    Ok(Rgb::new(r, g, b))
}

/// The 24-bit foreground control sequence (`ESC[38;2;r;g;bm`) for a color.
#[must_use]
pub fn rgb_to_color_code(color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Interpolation ───────────────────────────────────────────────────────────

/// Linear interpolation `a + (b - a) * t`, truncated toward zero.
///
/// `t` is expected in `[0, 1]` but is not clamped; extrapolation is the
/// caller's business.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn lerp(a: i32, b: i32, t: f64) -> i32 {
    let a = f64::from(a);
    let b = f64::from(b);
    // `as` truncates toward zero and saturates at the i32 range.
    (a + (b - a) * t) as i32
}

/// Component-wise [`lerp`] between two colors.
///
/// Channels are saturated into `0..=255`, which only matters when `t`
/// leaves `[0, 1]`.
#[must_use]
pub fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp_channel(c1.r, c2.r, t),
        lerp_channel(c1.g, c2.g, t),
        lerp_channel(c1.b, c2.b, t),
    )
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    // Safe: clamp guarantees 0 <= value <= 255 before the cast.
    lerp(i32::from(a), i32::from(b), t).clamp(0, 255) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    // ── Hex parsing ────────────────────────────────────────────────────

    #[test]
    fn hex_default_head() {
        assert_eq!(hex_to_rgb("681414").unwrap(), Rgb::new(0x68, 0x14, 0x14));
    }

    #[test]
    fn hex_default_tail() {
        assert_eq!(hex_to_rgb("7b87ed").unwrap(), Rgb::new(123, 135, 237));
    }

    #[test]
    fn hex_uppercase() {
        assert_eq!(hex_to_rgb("7B87ED").unwrap(), Rgb::new(123, 135, 237));
    }

    #[test]
    fn hex_with_hash() {
        assert_eq!(hex_to_rgb("#ffffff").unwrap(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn hex_too_short() {
        assert_eq!(
            hex_to_rgb("fff"),
            Err(ColorError::InvalidFormat("fff".into()))
        );
    }

    #[test]
    fn hex_too_long() {
        assert!(hex_to_rgb("7b87ed00").is_err());
    }

    #[test]
    fn hex_non_hex_digit() {
        assert!(hex_to_rgb("7b87eg").is_err());
    }

    #[test]
    fn hex_empty() {
        assert!(hex_to_rgb("").is_err());
    }

    #[test]
    fn hex_double_hash_rejected() {
        assert!(hex_to_rgb("##7b87ed").is_err());
    }

    #[test]
    fn hex_multibyte_rejected() {
        // Six bytes, but not six hex digits.
        assert!(hex_to_rgb("ééé").is_err());
    }

    #[test]
    fn from_str_delegates() {
        let c: Rgb = "681414".parse().unwrap();
        assert_eq!(c, Rgb::new(0x68, 0x14, 0x14));
        assert!("nope".parse::<Rgb>().is_err());
    }

    #[test]
    fn error_message_names_input() {
        let err = hex_to_rgb("xyz").unwrap_err();
        assert!(err.to_string().contains("\"xyz\""));
    }

    // ── Formatting ─────────────────────────────────────────────────────

    #[test]
    fn color_code_format() {
        assert_eq!(
            rgb_to_color_code(Rgb::new(104, 20, 20)),
            "\x1b[38;2;104;20;20m"
        );
    }

    #[test]
    fn to_hex_is_lowercase_padded() {
        assert_eq!(Rgb::new(0, 10, 255).to_hex(), "000aff");
    }

    #[test]
    fn display_has_hash() {
        assert_eq!(Rgb::new(0x7b, 0x87, 0xed).to_string(), "#7b87ed");
    }

    // ── Interpolation ──────────────────────────────────────────────────

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(0, 10, 0.5), 5);
    }

    #[test]
    fn lerp_truncates_toward_zero() {
        assert_eq!(lerp(0, 10, 0.99), 9);
        assert_eq!(lerp(0, -10, 0.99), -9);
    }

    #[test]
    fn lerp_not_clamped() {
        assert_eq!(lerp(0, 10, 2.0), 20);
        assert_eq!(lerp(0, 10, -1.0), -10);
    }

    #[test]
    fn lerp_color_endpoints() {
        let head = Rgb::new(0x68, 0x14, 0x14);
        let tail = Rgb::new(0x7b, 0x87, 0xed);
        assert_eq!(lerp_color(head, tail, 0.0), head);
        assert_eq!(lerp_color(head, tail, 1.0), tail);
    }

    #[test]
    fn lerp_color_midpoint() {
        let c = lerp_color(Rgb::new(0, 0, 0), Rgb::new(255, 100, 11), 0.5);
        assert_eq!(c, Rgb::new(127, 50, 5));
    }

    #[test]
    fn lerp_color_saturates_when_extrapolating() {
        let c = lerp_color(Rgb::new(0, 0, 0), Rgb::new(200, 200, 200), 2.0);
        assert_eq!(c, Rgb::new(255, 255, 255));
    }

    // ── Properties ─────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn hex_roundtrip(s in "[0-9a-fA-F]{6}") {
            let rgb = hex_to_rgb(&s).unwrap();
            prop_assert_eq!(rgb.to_hex(), s.to_ascii_lowercase());
        }

        #[test]
        fn lerp_hits_endpoints(a in -100_000i32..100_000, b in -100_000i32..100_000) {
            prop_assert_eq!(lerp(a, b, 0.0), a);
            prop_assert_eq!(lerp(a, b, 1.0), b);
        }

        #[test]
        fn lerp_color_is_componentwise(
            c1 in any::<(u8, u8, u8)>(),
            c2 in any::<(u8, u8, u8)>(),
            t in 0.0f64..=1.0,
        ) {
            let a = Rgb::new(c1.0, c1.1, c1.2);
            let b = Rgb::new(c2.0, c2.1, c2.2);
            let got = lerp_color(a, b, t);
            prop_assert_eq!(i32::from(got.r), lerp(i32::from(a.r), i32::from(b.r), t));
            prop_assert_eq!(i32::from(got.g), lerp(i32::from(a.g), i32::from(b.g), t));
            prop_assert_eq!(i32::from(got.b), lerp(i32::from(a.b), i32::from(b.b), t));
        }
    }
}
