//! Colours and user theme overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::font_metrics::FontFamily;

// ────────────────────────────────────────────────────────────────────────────
// Color
// ────────────────────────────────────────────────────────────────────────────

/// 8-bit sRGB colour. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid colour '{0}' (expected #rgb or #rrggbb)")]
pub struct ParseColorError(String);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const TEXT: Color = Color::rgb(0x1f, 0x29, 0x37);
    pub const MUTED: Color = Color::rgb(0x6b, 0x72, 0x80);
    pub const RULE: Color = Color::rgb(0xd1, 0xd5, 0xdb);
    pub const TINT: Color = Color::rgb(0xf3, 0xf4, 0xf6);

    /// Components scaled to 0.0..=1.0 for PDF colour operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Mixes this colour toward white; `amount` 0.0 keeps it, 1.0 is white.
    pub fn lighten(self, amount: f32) -> Color {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * amount).round() as u8;
        Color::rgb(mix(self.r), mix(self.g), mix(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Theme
// ────────────────────────────────────────────────────────────────────────────

pub const MIN_FONT_SCALE: f32 = 0.8;
pub const MAX_FONT_SCALE: f32 = 1.25;

fn default_font_scale() -> f32 {
    1.0
}

/// User overrides applied on top of a template's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default)]
    pub accent_color: Option<Color>,
    #[serde(default)]
    pub font_family: Option<FontFamily>,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent_color: None,
            font_family: None,
            font_scale: default_font_scale(),
        }
    }
}

impl Theme {
    /// Font scale clamped to the supported range; non-finite values reset to 1.0.
    pub fn effective_scale(&self) -> f32 {
        if self.font_scale.is_finite() {
            self.font_scale.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        assert_eq!("#2563eb".parse::<Color>(), Ok(Color::rgb(0x25, 0x63, 0xeb)));
    }

    #[test]
    fn test_parse_three_digit_hex() {
        assert_eq!("#0af".parse::<Color>(), Ok(Color::rgb(0x00, 0xaa, 0xff)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["2563eb", "#12", "#12345g", "#1234567", "", "#ééé"] {
            assert!(bad.parse::<Color>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_color_serde_round_trips_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 255)).unwrap();
        assert_eq!(json, "\"#0102ff\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(1, 2, 255));
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn test_lighten() {
        assert_eq!(Color::rgb(0, 0, 0).lighten(1.0), Color::WHITE);
        assert_eq!(Color::rgb(100, 100, 100).lighten(0.0), Color::rgb(100, 100, 100));
    }

    #[test]
    fn test_theme_defaults_and_scale_clamp() {
        let theme: Theme = serde_json::from_str("{}").unwrap();
        assert_eq!(theme, Theme::default());
        let big = Theme {
            font_scale: 3.0,
            ..Default::default()
        };
        assert_eq!(big.effective_scale(), MAX_FONT_SCALE);
        let nan = Theme {
            font_scale: f32::NAN,
            ..Default::default()
        };
        assert_eq!(nan.effective_scale(), 1.0);
    }

    #[test]
    fn test_theme_parses_camel_case() {
        let theme: Theme = serde_json::from_str(
            r##"{"accentColor":"#111827","fontFamily":"serif","fontScale":0.9}"##,
        )
        .unwrap();
        assert_eq!(theme.accent_color, Some(Color::rgb(0x11, 0x18, 0x27)));
        assert_eq!(theme.font_family, Some(FontFamily::Serif));
        assert!((theme.font_scale - 0.9).abs() < 1e-6);
    }
}
