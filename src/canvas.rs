//! In-memory drawing surface with the handful of primitives the generators need.
//!
//! Coordinates follow the usual raster convention: origin at the top-left,
//! rectangles inclusive of both corners. Anything outside the canvas is
//! clipped.

use crate::font::{ResolvedFont, TextBounds};
use crate::layout::Rect;
use anyhow::{bail, Result};
use image::{ImageBuffer, Pixel, Rgba, RgbaImage};

/// Stroke drawn along the inside edge of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Rgba<u8>,
    pub width: i32,
}

impl Outline {
    pub fn new(color: Rgba<u8>, width: i32) -> Self {
        Self { color, width }
    }
}

/// An image under construction.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("Canvas dimensions must be non-zero, got {width}x{height}");
        }

        Ok(Self {
            image: ImageBuffer::from_pixel(width, height, background),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Composite `color` over the pixel at (`x`, `y`) with the given coverage.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }

        let coverage = coverage.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);

        if coverage >= 1.0 && color[3] == 255 {
            *pixel = color;
            return;
        }

        let mut src = color;
        src[3] = (color[3] as f32 * coverage).round() as u8;
        pixel.blend(&src);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        self.fill_where(rect, color, |_, _| true);
    }

    /// Plain rectangle with optional fill and inward outline.
    pub fn rectangle(&mut self, rect: Rect, fill: Option<Rgba<u8>>, outline: Option<Outline>) {
        if let Some(color) = fill {
            self.fill_rect(rect, color);
        }

        if let Some(outline) = outline {
            let inner = rect.inset(outline.width);
            self.fill_where(rect, outline.color, |x, y| !inner.contains(x, y));
        }
    }

    /// Rectangle with circular corners of `radius` pixels.
    pub fn rounded_rectangle(
        &mut self,
        rect: Rect,
        radius: i32,
        fill: Option<Rgba<u8>>,
        outline: Option<Outline>,
    ) {
        if let Some(color) = fill {
            self.fill_where(rect, color, |x, y| in_rounded_rect(rect, radius, x, y));
        }

        if let Some(outline) = outline {
            let inner = rect.inset(outline.width);
            let inner_radius = (radius - outline.width).max(0);
            self.fill_where(rect, outline.color, |x, y| {
                in_rounded_rect(rect, radius, x, y) && !in_rounded_rect(inner, inner_radius, x, y)
            });
        }
    }

    fn fill_where<F>(&mut self, rect: Rect, color: Rgba<u8>, inside: F)
    where
        F: Fn(i32, i32) -> bool,
    {
        if rect.is_empty() {
            return;
        }

        let x0 = rect.x0.max(0);
        let y0 = rect.y0.max(0);
        let x1 = rect.x1.min(self.width() as i32 - 1);
        let y1 = rect.y1.min(self.height() as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(x, y) {
                    self.blend_pixel(x, y, color, 1.0);
                }
            }
        }
    }

    /// Draw `text` with the top-left of its line box at `origin`.
    pub fn draw_text(
        &mut self,
        origin: (f32, f32),
        text: &str,
        font: &ResolvedFont,
        color: Rgba<u8>,
    ) {
        font.rasterize(origin, text, |x, y, coverage| {
            self.blend_pixel(x, y, color, coverage)
        });
    }

    /// Draw `text` so that the center of its ink box lands on `center`.
    ///
    /// Returns the ink box as drawn.
    pub fn draw_text_centered(
        &mut self,
        center: (f32, f32),
        text: &str,
        font: &ResolvedFont,
        color: Rgba<u8>,
    ) -> TextBounds {
        let (mid_x, mid_y) = font.measure(text).center();
        let origin = (center.0 - mid_x, center.1 - mid_y);

        self.draw_text(origin, text, font, color);
        font.measure_at(origin, text)
    }

    /// Word-wrap `text` to `max_width` and draw the lines as a block centered on `center`.
    ///
    /// Every line is centered horizontally; lines are `1.2 x size` apart.
    pub fn draw_text_wrapped(
        &mut self,
        center: (f32, f32),
        text: &str,
        font: &ResolvedFont,
        color: Rgba<u8>,
        max_width: f32,
    ) -> Vec<TextBounds> {
        let lines = wrap_lines(text, font, max_width);
        let line_height = font.line_height();
        let mut y = center.1 - lines.len() as f32 * line_height / 2.0;

        let mut drawn = Vec::with_capacity(lines.len());
        for line in &lines {
            let (mid_x, _) = font.measure(line).center();
            let origin = (center.0 - mid_x, y);
            self.draw_text(origin, line, font, color);
            drawn.push(font.measure_at(origin, line));
            y += line_height;
        }

        drawn
    }
}

/// Greedy word wrap: words are appended to the current line while its
/// measured width stays within `max_width`.
///
/// A single word wider than `max_width` is kept whole on its own line.
pub fn wrap_lines(text: &str, font: &ResolvedFont, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        current.push(word);
        let candidate = current.join(" ");

        if font.measure(&candidate).width() <= max_width {
            continue;
        }

        current.pop();
        if !current.is_empty() {
            lines.push(current.join(" "));
        }
        current = vec![word];
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}

fn in_rounded_rect(rect: Rect, radius: i32, x: i32, y: i32) -> bool {
    if rect.is_empty() || !rect.contains(x, y) {
        return false;
    }

    let radius = radius.min(rect.width() / 2).min(rect.height() / 2).max(0);
    if radius == 0 {
        return true;
    }

    // Distance to the nearest corner circle center; zero along the straight edges
    let cx = x.clamp(rect.x0 + radius, rect.x1 - radius);
    let cy = y.clamp(rect.y0 + radius, rect.y1 - radius);
    let (dx, dy) = ((x - cx) as i64, (y - cy) as i64);

    dx * dx + dy * dy <= (radius as i64) * (radius as i64)
}
