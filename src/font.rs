//! Font resolution and text measurement.
//!
//! Fonts are looked up by probing a fixed list of system font files. When none
//! of them can be loaded the built-in bitmap face is used instead, so
//! resolution never fails; it only degrades.

use crate::builtin_font::{self, ADVANCE, GLYPH_HEIGHT, LINE_HEIGHT};
use log::{debug, warn};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::{
    cell::RefCell,
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Line height as a multiple of the font size.
pub const LINE_SPACING: f32 = 1.2;

/// Bounding box of rendered text, in canvas pixels.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl TextBounds {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    fn union(self, other: TextBounds) -> TextBounds {
        TextBounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

#[derive(Clone)]
enum Face {
    TrueType(Font<'static>),
    Builtin,
}

/// A font loaded at a specific pixel size.
#[derive(Clone)]
pub struct ResolvedFont {
    face: Face,
    size: u32,
    source: Option<PathBuf>,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("family", &self.family())
            .field("size", &self.size)
            .field("fallback", &self.is_fallback())
            .finish()
    }
}

impl ResolvedFont {
    /// The built-in bitmap face at the given pixel size.
    pub fn builtin(size: u32) -> Self {
        Self {
            face: Face::Builtin,
            size,
            source: None,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// True when no system font could be loaded.
    pub fn is_fallback(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    /// File the face was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Family name derived from the font file name, or `builtin`.
    pub fn family(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "builtin".to_string())
    }

    pub fn line_height(&self) -> f32 {
        self.size as f32 * LINE_SPACING
    }

    /// Horizontal pen advance of `text`.
    pub fn advance(&self, text: &str) -> f32 {
        match &self.face {
            Face::TrueType(font) => {
                let glyphs = self.layout(font, text, (0.0, 0.0));
                glyphs
                    .last()
                    .map(|glyph| {
                        glyph.position().x + glyph.unpositioned().h_metrics().advance_width
                    })
                    .unwrap_or(0.0)
            }
            Face::Builtin => {
                let count = text.chars().count() as u32;
                (count * ADVANCE * self.pixel_scale()) as f32
            }
        }
    }

    /// Bounding box of `text` drawn with its line box at the origin.
    pub fn measure(&self, text: &str) -> TextBounds {
        self.measure_at((0.0, 0.0), text)
    }

    /// Bounding box of `text` drawn with its line box at `origin`.
    ///
    /// Uses the ink box of the rendered glyphs; text without ink (blank
    /// strings) falls back to the advance box.
    pub fn measure_at(&self, origin: (f32, f32), text: &str) -> TextBounds {
        self.ink_bounds(origin, text)
            .unwrap_or_else(|| self.advance_bounds(origin, text))
    }

    fn ink_bounds(&self, origin: (f32, f32), text: &str) -> Option<TextBounds> {
        match &self.face {
            Face::TrueType(font) => self
                .layout(font, text, origin)
                .iter()
                .filter_map(PositionedGlyph::pixel_bounding_box)
                .map(|bb| TextBounds {
                    left: bb.min.x as f32,
                    top: bb.min.y as f32,
                    right: bb.max.x as f32,
                    bottom: bb.max.y as f32,
                })
                .reduce(TextBounds::union),
            Face::Builtin => {
                let s = self.pixel_scale() as i32;
                let (ox, oy) = snap(origin);
                text.chars()
                    .enumerate()
                    .filter_map(|(i, ch)| {
                        let (c0, r0, c1, r1) = builtin_font::ink_extent(builtin_font::glyph(ch))?;
                        let cell_x = ox + i as i32 * ADVANCE as i32 * s;
                        Some(TextBounds {
                            left: (cell_x + c0 as i32 * s) as f32,
                            top: (oy + r0 as i32 * s) as f32,
                            right: (cell_x + (c1 as i32 + 1) * s) as f32,
                            bottom: (oy + (r1 as i32 + 1) * s) as f32,
                        })
                    })
                    .reduce(TextBounds::union)
            }
        }
    }

    /// Legacy measurement: pen advance by the face's full glyph height.
    fn advance_bounds(&self, origin: (f32, f32), text: &str) -> TextBounds {
        let height = match &self.face {
            Face::TrueType(font) => {
                let v_metrics = font.v_metrics(self.scale());
                v_metrics.ascent - v_metrics.descent
            }
            Face::Builtin => (GLYPH_HEIGHT * self.pixel_scale()) as f32,
        };

        TextBounds {
            left: origin.0,
            top: origin.1,
            right: origin.0 + self.advance(text),
            bottom: origin.1 + height,
        }
    }

    /// Rasterize `text` with its line box at `origin`, calling `plot` with
    /// each covered pixel and its coverage in `0.0..=1.0`.
    pub(crate) fn rasterize<F>(&self, origin: (f32, f32), text: &str, mut plot: F)
    where
        F: FnMut(i32, i32, f32),
    {
        match &self.face {
            Face::TrueType(font) => {
                for glyph in self.layout(font, text, origin) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|x, y, coverage| {
                            plot(bb.min.x + x as i32, bb.min.y + y as i32, coverage)
                        });
                    }
                }
            }
            Face::Builtin => {
                let s = self.pixel_scale();
                let (ox, oy) = snap(origin);
                for (i, ch) in text.chars().enumerate() {
                    let rows = builtin_font::glyph(ch);
                    let cell_x = ox + (i as u32 * ADVANCE * s) as i32;
                    for row in 0..GLYPH_HEIGHT {
                        for col in 0..builtin_font::GLYPH_WIDTH {
                            if !builtin_font::is_lit(rows, col, row) {
                                continue;
                            }
                            // Each font unit becomes an s x s block
                            for dy in 0..s {
                                for dx in 0..s {
                                    plot(
                                        cell_x + (col * s + dx) as i32,
                                        oy + (row * s + dy) as i32,
                                        1.0,
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn layout(
        &self,
        font: &Font<'static>,
        text: &str,
        origin: (f32, f32),
    ) -> Vec<PositionedGlyph<'static>> {
        let scale = self.scale();
        let ascent = font.v_metrics(scale).ascent;
        font.layout(text, scale, point(origin.0, origin.1 + ascent))
            .collect()
    }

    fn scale(&self) -> Scale {
        Scale::uniform(self.size as f32)
    }

    /// Integer magnification applied to the bitmap face.
    fn pixel_scale(&self) -> u32 {
        ((self.size as f32 / LINE_HEIGHT as f32).round() as u32).max(1)
    }
}

fn snap(origin: (f32, f32)) -> (i32, i32) {
    (origin.0.round() as i32, origin.1.round() as i32)
}

#[derive(Clone)]
struct LoadedFace {
    path: PathBuf,
    font: Font<'static>,
}

/// Probes candidate font files and hands out sized fonts.
///
/// Loaded faces are cached per weight for the lifetime of the resolver.
pub struct FontResolver {
    regular: Vec<PathBuf>,
    bold: Vec<PathBuf>,
    cache: RefCell<HashMap<bool, Option<LoadedFace>>>,
}

impl FontResolver {
    /// Resolver over the usual macOS, Linux and Windows font locations.
    pub fn system() -> Self {
        Self::with_candidates(system_candidates(false), system_candidates(true))
    }

    /// Resolver over explicit candidate lists, probed in order.
    pub fn with_candidates(regular: Vec<PathBuf>, bold: Vec<PathBuf>) -> Self {
        Self {
            regular,
            bold,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Return the first loadable candidate at `size` pixels, or the built-in face.
    pub fn resolve(&self, size: u32, bold: bool) -> ResolvedFont {
        let loaded = self
            .cache
            .borrow_mut()
            .entry(bold)
            .or_insert_with(|| {
                let candidates = if bold { &self.bold } else { &self.regular };
                load_first(candidates)
            })
            .clone();

        match loaded {
            Some(LoadedFace { path, font }) => ResolvedFont {
                face: Face::TrueType(font),
                size,
                source: Some(path),
            },
            None => ResolvedFont::builtin(size),
        }
    }
}

fn load_first(candidates: &[PathBuf]) -> Option<LoadedFace> {
    for path in candidates {
        if !path.exists() {
            debug!("Font candidate not found: {}", path.display());
            continue;
        }

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("Can't read font {}: {err}", path.display());
                continue;
            }
        };

        match Font::try_from_vec(bytes) {
            Some(font) => {
                debug!("Using font {}", path.display());
                return Some(LoadedFace {
                    path: path.clone(),
                    font,
                });
            }
            None => debug!("Not a usable font file: {}", path.display()),
        }
    }

    warn!("No system font could be loaded, falling back to the built-in bitmap font");
    None
}

fn system_candidates(bold: bool) -> Vec<PathBuf> {
    let pick = |bold_path: &str, regular_path: &str| {
        PathBuf::from(if bold { bold_path } else { regular_path })
    };

    vec![
        // macOS
        PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
        PathBuf::from("/System/Library/Fonts/SFNSDisplay.ttf"),
        PathBuf::from("/System/Library/Fonts/Supplemental/Arial.ttf"),
        // Linux
        pick(
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        ),
        pick(
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        ),
        // Windows
        pick("C:\\Windows\\Fonts\\arialbd.ttf", "C:\\Windows\\Fonts\\arial.ttf"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolver_falls_back_without_candidates() {
        let resolver = FontResolver::with_candidates(Vec::new(), Vec::new());
        let font = resolver.resolve(24, true);

        assert!(font.is_fallback());
        assert_eq!(font.size(), 24);
        assert_eq!(font.family(), "builtin");
        assert!(font.source().is_none());
    }

    #[test]
    fn test_resolver_skips_unreadable_candidates() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let bogus = temp_dir.path().join("broken.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();

        let resolver = FontResolver::with_candidates(
            vec![temp_dir.path().join("missing.ttf"), bogus],
            Vec::new(),
        );

        assert!(resolver.resolve(12, false).is_fallback());
    }

    #[test]
    fn test_system_candidates_differ_by_weight() {
        let regular = system_candidates(false);
        let bold = system_candidates(true);

        assert_eq!(regular.len(), bold.len());
        assert!(bold
            .iter()
            .any(|p| p.to_string_lossy().ends_with("DejaVuSans-Bold.ttf")));
        assert!(regular
            .iter()
            .any(|p| p.to_string_lossy().ends_with("DejaVuSans.ttf")));
    }

    #[test]
    fn test_builtin_measure_scales_with_size() {
        // 16px -> 2x magnification; "T" spans the full 5x7 cell
        let font = ResolvedFont::builtin(16);
        let bounds = font.measure("T");

        assert_eq!(bounds.left, 0.0);
        assert_eq!(bounds.top, 0.0);
        assert_eq!(bounds.width(), 10.0);
        assert_eq!(bounds.height(), 14.0);
        assert_eq!(font.advance("TT"), 24.0);
    }

    #[test]
    fn test_blank_text_uses_advance_box() {
        let font = ResolvedFont::builtin(8);
        let bounds = font.measure("   ");

        assert_eq!(bounds.width(), 18.0);
        assert_eq!(bounds.height(), 7.0);
    }

    #[test]
    fn test_measure_at_translates() {
        let font = ResolvedFont::builtin(8);
        let at_origin = font.measure("Hi");
        let shifted = font.measure_at((10.0, 20.0), "Hi");

        assert_eq!(shifted.left, at_origin.left + 10.0);
        assert_eq!(shifted.top, at_origin.top + 20.0);
        assert_eq!(shifted.width(), at_origin.width());
    }

    #[test]
    fn test_line_height() {
        assert_eq!(ResolvedFont::builtin(20).line_height(), 24.0);
    }
}
