//! Chrome Web Store image requirements and conformance checks.

use anyhow::{Context, Result};
use image::ColorType;
use serde::Deserialize;
use std::{fmt, path::Path};

const REQUIREMENTS_JSON: &str = r#"
{
  "screenshots": {
    "sizes": [
      { "width": 1280, "height": 800 },
      { "width": 640, "height": 400 }
    ],
    "max_count": 5
  },
  "small_tile": { "width": 440, "height": 280 },
  "marquee_tile": { "width": 1400, "height": 560 }
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenshotRules {
    pub sizes: Vec<Dimensions>,
    pub max_count: usize,
}

/// Image sizes accepted by the store listing.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequirements {
    pub screenshots: ScreenshotRules,
    pub small_tile: Dimensions,
    pub marquee_tile: Dimensions,
}

/// What a listing image is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Screenshot,
    SmallTile,
    MarqueeTile,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Screenshot => "screenshot",
            AssetKind::SmallTile => "small promo tile",
            AssetKind::MarqueeTile => "marquee promo tile",
        };
        f.write_str(name)
    }
}

impl StoreRequirements {
    /// Parse the embedded requirement table.
    pub fn load() -> Result<Self> {
        serde_json::from_str(REQUIREMENTS_JSON).context("Failed to parse store requirements")
    }

    /// Which listing slot an image of this size fits, if any.
    pub fn classify(&self, width: u32, height: u32) -> Option<AssetKind> {
        let dims = Dimensions { width, height };

        if self.screenshots.sizes.contains(&dims) {
            Some(AssetKind::Screenshot)
        } else if dims == self.small_tile {
            Some(AssetKind::SmallTile)
        } else if dims == self.marquee_tile {
            Some(AssetKind::MarqueeTile)
        } else {
            None
        }
    }

    /// Human-readable summary printed after a promo run.
    pub fn summary_lines(&self) -> Vec<String> {
        let screenshot_sizes = self
            .screenshots
            .sizes
            .iter()
            .map(Dimensions::to_string)
            .collect::<Vec<_>>()
            .join(" or ");

        vec![
            format!(
                "Screenshots: {screenshot_sizes} (up to {} max)",
                self.screenshots.max_count
            ),
            format!("Small promo tile: {}", self.small_tile),
            format!("Marquee promo tile: {}", self.marquee_tile),
            "All images are 24-bit PNG (no alpha)".to_string(),
        ]
    }
}

/// Result of checking one PNG against the store requirements.
#[derive(Debug, Clone)]
pub struct Conformance {
    pub dimensions: Dimensions,
    pub color: ColorType,
    pub kind: Option<AssetKind>,
}

impl Conformance {
    pub fn is_rgb24(&self) -> bool {
        self.color == ColorType::Rgb8
    }

    pub fn is_ok(&self) -> bool {
        self.kind.is_some() && self.is_rgb24()
    }
}

/// Open `path` and check its size and pixel format.
pub fn check_png(requirements: &StoreRequirements, path: &Path) -> Result<Conformance> {
    let img = image::open(path).with_context(|| format!("Failed to load {}", path.display()))?;

    Ok(Conformance {
        dimensions: Dimensions {
            width: img.width(),
            height: img.height(),
        },
        color: img.color(),
        kind: requirements.classify(img.width(), img.height()),
    })
}
