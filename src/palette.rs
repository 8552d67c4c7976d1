//! Named colors shared by the icon and promo generators.

use anyhow::{anyhow, Context, Result};
use image::Rgba;
use serde::Deserialize;
use std::str::FromStr;

const PALETTE_JSON: &str = r##"
{
  "primary": "#4A90E2",
  "secondary": "#357ABD",
  "accent": "#5BA3F5",
  "text": "#FFFFFF",
  "text_dark": "#2C3E50",
  "background": "#F8F9FA",
  "success": "#27AE60",
  "surface": "#FFFFFF"
}
"##;

#[derive(Debug, Deserialize)]
struct PaletteEntries {
    primary: String,
    secondary: String,
    accent: String,
    text: String,
    text_dark: String,
    background: String,
    success: String,
    surface: String,
}

/// Resolved color scheme used by every scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Brand blue, icon and tile background
    pub primary: Rgba<u8>,
    /// Darker blue for window outlines
    pub secondary: Rgba<u8>,
    pub accent: Rgba<u8>,
    /// Text drawn on top of the brand color
    pub text: Rgba<u8>,
    /// Text drawn on light backgrounds
    pub text_dark: Rgba<u8>,
    /// Screenshot page background
    pub background: Rgba<u8>,
    pub success: Rgba<u8>,
    /// Fill for windows, panels and cards
    pub surface: Rgba<u8>,
}

impl Palette {
    /// Parse the embedded color table.
    pub fn load() -> Result<Self> {
        let entries: PaletteEntries =
            serde_json::from_str(PALETTE_JSON).context("Failed to parse embedded palette")?;

        Ok(Self {
            primary: parse_color(&entries.primary)?,
            secondary: parse_color(&entries.secondary)?,
            accent: parse_color(&entries.accent)?,
            text: parse_color(&entries.text)?,
            text_dark: parse_color(&entries.text_dark)?,
            background: parse_color(&entries.background)?,
            success: parse_color(&entries.success)?,
            surface: parse_color(&entries.surface)?,
        })
    }
}

/// Parse a CSS color (`#fff`, `#4A90E2`, `rgb(...)`, named colors) into an RGBA pixel.
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow!("Invalid color: {color}. Expected a CSS color such as #4A90E2"))?;

    Ok(Rgba([
        channel(srgb.red),
        channel(srgb.green),
        channel(srgb.blue),
        channel(srgb.alpha),
    ]))
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_loads_brand_colors() {
        let palette = Palette::load().unwrap();
        assert_eq!(palette.primary, Rgba([0x4A, 0x90, 0xE2, 255]));
        assert_eq!(palette.text_dark, Rgba([0x2C, 0x3E, 0x50, 255]));
        assert_eq!(palette.surface, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_color("#fff").unwrap(), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_parse_invalid_color() {
        let err = parse_color("not-a-color").unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }
}
