//! Immutable sRGB color value with the hex, HSL and WCAG luminance views the theme engine needs.

use std::{fmt, str::FromStr};

use palette::{Clamp, FromColor, Hsl, Srgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Luminance boundary under which a color is considered dark.
const DARK_LUMINANCE_THRESHOLD: f64 = 0.5;

/// Raised when a color literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The literal is not `#RGB` or `#RRGGBB`.
    #[error("invalid hex color `{input}`")]
    InvalidHex {
        /// Literal as received.
        input: String,
    },
    /// The literal is not an `H S% L%` triplet.
    #[error("invalid HSL triplet `{input}`")]
    InvalidTriplet {
        /// Literal as received.
        input: String,
    },
}

/// An opaque sRGB color. Every transform returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorValue {
    red: u8,
    green: u8,
    blue: u8,
}

impl ColorValue {
    /// Pure white.
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);
    /// Pure black.
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    /// Neutral dark used as the default foreground.
    pub const NEAR_BLACK: Self = Self::new(0x11, 0x11, 0x11);
    /// Brand blue used when the logo yields no usable primary.
    pub const DEFAULT_PRIMARY: Self = Self::new(0x25, 0x63, 0xEB);

    /// Build a color from its 8-bit channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse `#RRGGBB` or `#RGB` (the `#` is optional, case-insensitive).
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex {
            input: input.to_string(),
        };

        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        match digits.len() {
            6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            3 => {
                let expand = |value: u8| value * 0x11;
                Ok(Self::new(
                    expand(channel(0..1)?),
                    expand(channel(1..2)?),
                    expand(channel(2..3)?),
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// Parse a hex literal, substituting `default` when it is malformed.
    pub fn from_hex_or(input: &str, default: Self) -> Self {
        Self::from_hex(input).unwrap_or(default)
    }

    /// Build a color from hue (degrees), saturation and lightness (percent).
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let hsl: Hsl = Hsl::new(
            hue,
            (saturation / 100.0).clamp(0.0, 1.0),
            (lightness / 100.0).clamp(0.0, 1.0),
        );
        Self::from_srgb(Srgb::from_color(hsl))
    }

    /// Red channel.
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green channel.
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue channel.
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Uppercase `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// HSL view with hue in degrees and saturation/lightness in percent.
    pub fn to_hsl(&self) -> HslTriplet {
        let hsl: Hsl = Hsl::from_color(self.to_srgb());
        HslTriplet {
            hue: (hsl.hue.into_degrees() % 360.0 + 360.0) % 360.0,
            saturation: hsl.saturation.clamp(0.0, 1.0) * 100.0,
            lightness: hsl.lightness.clamp(0.0, 1.0) * 100.0,
        }
    }

    /// Linear interpolation in RGB space; `weight` is the share of `other`.
    pub fn mix(&self, other: Self, weight: f64) -> Self {
        let weight = if weight.is_nan() {
            0.0
        } else {
            weight.clamp(0.0, 1.0)
        };
        let lerp = |from: u8, to: u8| -> u8 {
            let value = f64::from(from) + (f64::from(to) - f64::from(from)) * weight;
            value.round().clamp(0.0, 255.0) as u8
        };
        Self::new(
            lerp(self.red, other.red),
            lerp(self.green, other.green),
            lerp(self.blue, other.blue),
        )
    }

    /// Raise lightness by `amount` of the full lightness range.
    pub fn lighten(&self, amount: f32) -> Self {
        self.shift_lightness(amount.clamp(0.0, 1.0))
    }

    /// Lower lightness by `amount` of the full lightness range.
    pub fn darken(&self, amount: f32) -> Self {
        self.shift_lightness(-amount.clamp(0.0, 1.0))
    }

    /// WCAG 2.x relative luminance in `[0, 1]`.
    pub fn relative_luminance(&self) -> f64 {
        fn linearize(channel: u8) -> f64 {
            let value = f64::from(channel) / 255.0;
            if value <= 0.03928 {
                value / 12.92
            } else {
                ((value + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linearize(self.red) + 0.7152 * linearize(self.green) + 0.0722 * linearize(self.blue)
    }

    /// WCAG contrast ratio, independent of argument order.
    pub fn contrast_ratio(&self, other: &Self) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// True when the relative luminance is below 0.5.
    pub fn is_dark(&self) -> bool {
        self.relative_luminance() < DARK_LUMINANCE_THRESHOLD
    }

    fn shift_lightness(&self, delta: f32) -> Self {
        let mut hsl: Hsl = Hsl::from_color(self.to_srgb());
        let before = hsl.lightness;
        hsl.lightness = (hsl.lightness + delta).clamp(0.0, 1.0);
        let shifted = Self::from_srgb(Srgb::from_color(hsl));

        // u8 rounding can undo a tiny step; never move against the requested direction.
        let moved_back = if delta > 0.0 {
            shifted.to_hsl().lightness < before * 100.0 - 0.5
        } else {
            shifted.to_hsl().lightness > before * 100.0 + 0.5
        };
        if moved_back { *self } else { shifted }
    }

    fn to_srgb(self) -> Srgb<f32> {
        Srgb::new(self.red, self.green, self.blue).into_format::<f32>()
    }

    fn from_srgb(rgb: Srgb<f32>) -> Self {
        let rgb: Srgb<u8> = rgb.clamp().into_format::<u8>();
        Self::new(rgb.red, rgb.green, rgb.blue)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ColorValue {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for ColorValue {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.to_hex()
    }
}

/// Hue in degrees, saturation and lightness in percent.
///
/// Displays as the bare `H S% L%` form consumed through `hsl(var(--name))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslTriplet {
    /// Hue, `[0, 360)`.
    pub hue: f32,
    /// Saturation, `[0, 100]`.
    pub saturation: f32,
    /// Lightness, `[0, 100]`.
    pub lightness: f32,
}

impl HslTriplet {
    /// Convert back into an sRGB color.
    pub fn to_color(self) -> ColorValue {
        ColorValue::from_hsl(self.hue, self.saturation, self.lightness)
    }
}

impl fmt::Display for HslTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hue = round_tenth(self.hue);
        if hue >= 360.0 {
            hue = 0.0;
        }
        write!(
            f,
            "{} {}% {}%",
            format_component(hue),
            format_component(round_tenth(self.saturation)),
            format_component(round_tenth(self.lightness))
        )
    }
}

impl FromStr for HslTriplet {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidTriplet {
            input: s.to_string(),
        };
        let mut parts = s.split_whitespace();
        let (Some(hue), Some(saturation), Some(lightness), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let number = |raw: &str| raw.parse::<f32>().map_err(|_| invalid());
        let percent = |raw: &str| {
            raw.strip_suffix('%')
                .ok_or_else(invalid)
                .and_then(|value| number(value))
        };

        Ok(Self {
            hue: number(hue)?,
            saturation: percent(saturation)?,
            lightness: percent(lightness)?,
        })
    }
}

fn round_tenth(value: f32) -> f32 {
    let rounded = (value * 10.0).round() / 10.0;
    // avoid printing "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn format_component(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(
            ColorValue::from_hex("#2563eb").unwrap(),
            ColorValue::DEFAULT_PRIMARY
        );
        assert_eq!(
            ColorValue::from_hex("fff").unwrap(),
            ColorValue::WHITE
        );
        assert_eq!(
            ColorValue::from_hex("  #111  ").unwrap(),
            ColorValue::NEAR_BLACK
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        for input in ["", "#", "#12", "#1234", "#12345g", "red", "#1234567", "+12345"] {
            assert!(
                matches!(ColorValue::from_hex(input), Err(ColorError::InvalidHex { .. })),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn malformed_foreground_falls_back_to_default() {
        assert_eq!(
            ColorValue::from_hex_or("not-a-color", ColorValue::NEAR_BLACK),
            ColorValue::NEAR_BLACK
        );
    }

    #[test]
    fn hex_output_is_uppercase() {
        assert_eq!(ColorValue::from_hex("#abcdef").unwrap().to_hex(), "#ABCDEF");
    }

    #[test]
    fn luminance_bounds() {
        assert_eq!(ColorValue::BLACK.relative_luminance(), 0.0);
        assert!((ColorValue::WHITE.relative_luminance() - 1.0).abs() < 1e-9);
        let red = ColorValue::new(255, 0, 0);
        assert!((red.relative_luminance() - 0.2126).abs() < 1e-9);
    }

    #[test]
    fn contrast_is_symmetric_and_maximal_for_black_on_white() {
        let ratio = ColorValue::WHITE.contrast_ratio(&ColorValue::BLACK);
        assert!((ratio - 21.0).abs() < 1e-9);
        let a = ColorValue::new(12, 200, 90);
        let b = ColorValue::new(240, 10, 33);
        assert_eq!(a.contrast_ratio(&b), b.contrast_ratio(&a));
        assert_eq!(a.contrast_ratio(&a), 1.0);
    }

    #[test]
    fn dark_boundary_uses_luminance() {
        assert!(ColorValue::BLACK.is_dark());
        assert!(ColorValue::new(255, 0, 0).is_dark());
        assert!(!ColorValue::WHITE.is_dark());
        assert!(!ColorValue::new(255, 255, 0).is_dark());
    }

    #[test]
    fn mix_interpolates_toward_other() {
        let red = ColorValue::new(255, 0, 0);
        assert_eq!(red.mix(ColorValue::WHITE, 0.0), red);
        assert_eq!(red.mix(ColorValue::WHITE, 1.0), ColorValue::WHITE);
        let light = red.mix(ColorValue::WHITE, 0.7);
        assert_eq!(light.red(), 255);
        assert!((178..=179).contains(&light.green()));
        assert_eq!(light.green(), light.blue());
        let dark = red.mix(ColorValue::BLACK, 0.7);
        assert!((76..=77).contains(&dark.red()));
        assert_eq!((dark.green(), dark.blue()), (0, 0));
        assert_eq!(red.mix(ColorValue::WHITE, 7.0), ColorValue::WHITE);
    }

    #[test]
    fn lighten_and_darken_clamp_at_bounds() {
        assert_eq!(ColorValue::WHITE.lighten(0.5), ColorValue::WHITE);
        assert_eq!(ColorValue::BLACK.darken(0.5), ColorValue::BLACK);
        assert_eq!(ColorValue::new(40, 40, 40).lighten(1.0), ColorValue::WHITE);
        assert_eq!(ColorValue::new(40, 40, 40).darken(1.0), ColorValue::BLACK);
    }

    #[test]
    fn repeated_lighten_is_monotonic() {
        let mut color = ColorValue::new(30, 60, 120);
        let mut previous = color.to_hsl().lightness;
        for _ in 0..30 {
            color = color.lighten(0.05);
            let current = color.to_hsl().lightness;
            assert!(current + 0.5 >= previous);
            previous = current;
        }
        assert_eq!(color, ColorValue::WHITE);
    }

    #[test]
    fn triplet_formatting() {
        assert_eq!(ColorValue::new(255, 0, 0).to_hsl().to_string(), "0 100% 50%");
        assert_eq!(ColorValue::WHITE.to_hsl().to_string(), "0 0% 100%");
        assert_eq!(ColorValue::BLACK.to_hsl().to_string(), "0 0% 0%");
        assert_eq!(
            ColorValue::DEFAULT_PRIMARY.to_hsl().to_string(),
            "221.2 83.2% 53.3%"
        );
    }

    #[test]
    fn triplet_parses_back_to_the_same_color() {
        for color in [
            ColorValue::DEFAULT_PRIMARY,
            ColorValue::NEAR_BLACK,
            ColorValue::new(255, 153, 153),
            ColorValue::new(77, 0, 0),
        ] {
            let triplet: HslTriplet = color.to_hsl().to_string().parse().unwrap();
            let back = triplet.to_color();
            assert!(
                back.contrast_ratio(&color) < 1.02,
                "{color} came back as {back}"
            );
        }
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&ColorValue::DEFAULT_PRIMARY).unwrap();
        assert_eq!(json, "\"#2563EB\"");
        let parsed: ColorValue = serde_json::from_str("\"#2563eb\"").unwrap();
        assert_eq!(parsed, ColorValue::DEFAULT_PRIMARY);
        assert!(serde_json::from_str::<ColorValue>("\"nope\"").is_err());
    }
}
