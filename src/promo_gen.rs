//! Store listing screenshots and promotional tiles.
//!
//! Every element is placed at a fraction of the canvas so the same scene
//! renders at each accepted screenshot size.

use crate::canvas::{wrap_lines, Canvas, Outline};
use crate::export::{ensure_output_dir, save_png};
use crate::font::FontResolver;
use crate::layout::{centered_start, frac, row_starts, Rect};
use crate::palette::Palette;
use crate::requirements::{Dimensions, StoreRequirements};
use anyhow::{Error, Result};
use log::warn;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PromoOptions {
    pub output: PathBuf,
    /// Extension name used in titles
    pub name: String,
    pub tagline: String,
}

impl Default for PromoOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("promo-images"),
            name: "Demo Typer".to_string(),
            tagline: "Realistic Typing Simulation".to_string(),
        }
    }
}

/// The three screenshot scenes, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screenshot {
    /// Browser window with text being typed
    Typing,
    /// Extension settings panel
    Settings,
    /// Three use-case cards
    UseCases,
}

impl Screenshot {
    pub const ALL: [Screenshot; 3] = [Screenshot::Typing, Screenshot::Settings, Screenshot::UseCases];

    /// 1-based position in the listing.
    pub fn number(self) -> usize {
        match self {
            Screenshot::Typing => 1,
            Screenshot::Settings => 2,
            Screenshot::UseCases => 3,
        }
    }
}

/// One image of the promo batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoImage {
    Screenshot(Screenshot, Dimensions),
    SmallTile(Dimensions),
    MarqueeTile(Dimensions),
}

impl PromoImage {
    pub fn dimensions(&self) -> Dimensions {
        match *self {
            PromoImage::Screenshot(_, dims)
            | PromoImage::SmallTile(dims)
            | PromoImage::MarqueeTile(dims) => dims,
        }
    }

    pub fn file_name(&self) -> String {
        match self {
            PromoImage::Screenshot(scene, dims) => {
                format!("screenshot_{}_{dims}.png", scene.number())
            }
            PromoImage::SmallTile(dims) => format!("small_promo_tile_{dims}.png"),
            PromoImage::MarqueeTile(dims) => format!("marquee_promo_tile_{dims}.png"),
        }
    }

    pub fn render(&self, scene: &Scene<'_>) -> Result<Canvas> {
        let Dimensions { width, height } = self.dimensions();
        match self {
            PromoImage::Screenshot(Screenshot::Typing, _) => scene.typing(width, height),
            PromoImage::Screenshot(Screenshot::Settings, _) => scene.settings(width, height),
            PromoImage::Screenshot(Screenshot::UseCases, _) => scene.use_cases(width, height),
            PromoImage::SmallTile(_) => scene.small_tile(width, height),
            PromoImage::MarqueeTile(_) => scene.marquee_tile(width, height),
        }
    }
}

/// Every image the promo run produces: each scene at each screenshot size, then the tiles.
pub fn plan(requirements: &StoreRequirements) -> Vec<PromoImage> {
    let mut images: Vec<PromoImage> = Screenshot::ALL
        .iter()
        .flat_map(|&scene| {
            requirements
                .screenshots
                .sizes
                .iter()
                .map(move |&dims| PromoImage::Screenshot(scene, dims))
        })
        .collect();

    images.push(PromoImage::SmallTile(requirements.small_tile));
    images.push(PromoImage::MarqueeTile(requirements.marquee_tile));
    images
}

/// Shared drawing state for one promo run.
pub struct Scene<'a> {
    pub fonts: &'a FontResolver,
    pub palette: &'a Palette,
    pub options: &'a PromoOptions,
}

impl Scene<'_> {
    fn typing(&self, width: u32, height: u32) -> Result<Canvas> {
        let p = self.palette;
        let mut canvas = Canvas::new(width, height, p.background)?;
        self.title(&mut canvas, &format!("{} Extension", self.options.name));

        // Browser-like window
        let padding = frac(width, 0.1);
        let window_y = frac(height, 0.22);
        let window_height = frac(height, 0.65);
        canvas.rectangle(
            Rect::new(padding, window_y, width as i32 - padding, window_y + window_height),
            Some(p.surface),
            Some(Outline::new(p.secondary, 2)),
        );

        // Address bar
        let bar_height = frac(height, 0.05);
        canvas.rectangle(
            Rect::new(padding, window_y, width as i32 - padding, window_y + bar_height),
            Some(p.background),
            Some(Outline::new(p.secondary, 1)),
        );
        let address_font = self.fonts.resolve(font_px(height, 0.025), false);
        canvas.draw_text(
            ((padding + 10) as f32, (window_y + bar_height / 4) as f32),
            "https://example.com",
            &address_font,
            p.text_dark,
        );

        // Text mid-way through being typed: finished characters in green
        let content_y = window_y + bar_height + 30;
        let content_size = font_px(height, 0.04);
        let content_font = self.fonts.resolve(content_size, false);
        let typed = "Hello World!";
        let pending_from = typed.chars().count().saturating_sub(3);

        let mut cursor_x = (padding + 30) as f32;
        for (i, ch) in typed.chars().enumerate() {
            let color = if i < pending_from { p.success } else { p.text_dark };
            let glyph = ch.to_string();
            canvas.draw_text((cursor_x, content_y as f32), &glyph, &content_font, color);
            cursor_x += content_font.advance(&glyph);
        }

        let cursor_x = cursor_x as i32;
        canvas.fill_rect(
            Rect::new(cursor_x + 2, content_y, cursor_x + 6, content_y + content_size as i32),
            p.primary,
        );

        self.caption(
            &mut canvas,
            "Realistic typing simulation for impressive demos",
            0.95,
        );
        Ok(canvas)
    }

    fn settings(&self, width: u32, height: u32) -> Result<Canvas> {
        let p = self.palette;
        let mut canvas = Canvas::new(width, height, p.background)?;
        self.title(&mut canvas, "Easy Configuration");

        let panel_width = frac(width, 0.5);
        let panel_height = frac(height, 0.65);
        let panel_x = centered_start(width, panel_width);
        let panel_y = frac(height, 0.22);
        canvas.rounded_rectangle(
            Rect::from_origin_size(panel_x, panel_y, panel_width, panel_height),
            10,
            Some(p.surface),
            Some(Outline::new(p.primary, 3)),
        );

        let header_font = self.fonts.resolve(font_px(height, 0.05), true);
        canvas.draw_text(
            ((panel_x + 20) as f32, (panel_y + 20) as f32),
            "Settings",
            &header_font,
            p.primary,
        );

        let option_size = font_px(height, 0.035);
        let option_font = self.fonts.resolve(option_size, false);
        let option_spacing = frac(height, 0.08);
        let bullet = (option_size as i32 * 2 / 5).max(2);
        let mut option_y = panel_y + 100;

        for option in [
            "Typing Speed: Adjustable",
            "Delay: Customizable",
            "Target: Any Text Field",
            "Keyboard Shortcuts",
        ] {
            let bullet_x = panel_x + 40;
            let bullet_y = option_y + (option_size as i32 - bullet) / 2;
            canvas.fill_rect(
                Rect::from_origin_size(bullet_x, bullet_y, bullet, bullet),
                p.accent,
            );
            canvas.draw_text(
                ((bullet_x + bullet * 2) as f32, option_y as f32),
                option,
                &option_font,
                p.text_dark,
            );
            option_y += option_spacing;
        }

        self.caption(
            &mut canvas,
            "Customize typing speed and behavior to match your demo style",
            0.95,
        );
        Ok(canvas)
    }

    fn use_cases(&self, width: u32, height: u32) -> Result<Canvas> {
        let p = self.palette;
        let mut canvas = Canvas::new(width, height, p.background)?;
        self.title(&mut canvas, "Perfect for Presentations");

        let box_width = frac(width, 0.25);
        let box_height = frac(height, 0.5);
        let box_y = frac(height, 0.25);
        let spacing = frac(width, 0.04);

        let icon_font = self.fonts.resolve(font_px(height, 0.12), false);
        let title_font = self.fonts.resolve(font_px(height, 0.045), true);
        let desc_font = self.fonts.resolve(font_px(height, 0.03), false);
        let desc_spacing = frac(height, 0.04);

        let features = [
            ("</>", "Code Demos", ["Perfect for live", "coding sessions"]),
            ("Aa", "Tutorials", ["Create engaging", "video tutorials"]),
            ("[>]", "Presentations", ["Impress your", "audience"]),
        ];

        for (box_x, (icon, title, desc)) in row_starts(width, features.len(), box_width, spacing)
            .into_iter()
            .zip(features)
        {
            canvas.rounded_rectangle(
                Rect::from_origin_size(box_x, box_y, box_width, box_height),
                10,
                Some(p.surface),
                Some(Outline::new(p.primary, 2)),
            );

            let mid_x = (box_x + box_width / 2) as f32;
            let at = |fraction: f64| (box_y + frac(box_height as u32, fraction)) as f32;

            canvas.draw_text_centered((mid_x, at(0.25)), icon, &icon_font, p.primary);
            canvas.draw_text_centered((mid_x, at(0.55)), title, &title_font, p.text_dark);

            let mut desc_y = box_y + frac(box_height as u32, 0.7);
            for line in desc {
                canvas.draw_text_centered((mid_x, desc_y as f32), line, &desc_font, p.text_dark);
                desc_y += desc_spacing;
            }
        }

        self.caption(
            &mut canvas,
            "Make your demonstrations look professional and polished",
            0.92,
        );
        Ok(canvas)
    }

    fn small_tile(&self, width: u32, height: u32) -> Result<Canvas> {
        let p = self.palette;
        let mut canvas = Canvas::new(width, height, p.primary)?;
        let mid_x = (width / 2) as f32;

        let icon_font = self.fonts.resolve(font_px(height, 0.4), true);
        canvas.draw_text_centered((mid_x, frac(height, 0.35) as f32), "T", &icon_font, p.text);

        let title_font = self.fonts.resolve(font_px(height, 0.12), true);
        canvas.draw_text_centered(
            (mid_x, frac(height, 0.68) as f32),
            &self.options.name,
            &title_font,
            p.text,
        );

        let subtitle_font = self.fonts.resolve(font_px(height, 0.07), false);
        canvas.draw_text_wrapped(
            (mid_x, frac(height, 0.85) as f32),
            &self.options.tagline,
            &subtitle_font,
            p.text,
            frac(width, 0.9) as f32,
        );

        Ok(canvas)
    }

    fn marquee_tile(&self, width: u32, height: u32) -> Result<Canvas> {
        let p = self.palette;
        let mut canvas = Canvas::new(width, height, p.primary)?;

        // Left 40%: the brand glyph
        let left_width = frac(width, 0.4);
        let icon_font = self.fonts.resolve(font_px(height, 0.4), true);
        canvas.draw_text_centered(
            ((left_width / 2) as f32, (height / 2) as f32),
            "T",
            &icon_font,
            p.text,
        );

        // Right side: name, pitch and feature list, left-aligned
        let right_x = left_width + frac(width, 0.05);
        let column_width = width as i32 - right_x - frac(width, 0.05);

        let title_font = self.fonts.resolve(font_px(height, 0.12), true);
        canvas.draw_text(
            (right_x as f32, frac(height, 0.2) as f32),
            &format!("{} Extension", self.options.name),
            &title_font,
            p.text,
        );

        let subtitle_font = self.fonts.resolve(font_px(height, 0.06), false);
        let mut subtitle_y = frac(height, 0.4) as f32;
        for line in wrap_lines(
            "Create impressive demos with realistic typing simulation",
            &subtitle_font,
            column_width as f32,
        ) {
            canvas.draw_text((right_x as f32, subtitle_y), &line, &subtitle_font, p.text);
            subtitle_y += subtitle_font.line_height();
        }

        let feature_font = self.fonts.resolve(font_px(height, 0.045), false);
        let mut feature_y = frac(height, 0.58);
        for feature in [
            "✓ Adjustable typing speed",
            "✓ Natural typing patterns",
            "✓ Easy keyboard shortcuts",
        ] {
            canvas.draw_text(
                ((right_x + 20) as f32, feature_y as f32),
                feature,
                &feature_font,
                p.text,
            );
            feature_y += frac(height, 0.1);
        }

        Ok(canvas)
    }

    /// Bold heading centered near the top of a screenshot.
    fn title(&self, canvas: &mut Canvas, text: &str) {
        let (width, height) = (canvas.width(), canvas.height());
        let font = self.fonts.resolve(font_px(height, 0.08), true);
        canvas.draw_text_centered(
            ((width / 2) as f32, frac(height, 0.12) as f32),
            text,
            &font,
            self.palette.text_dark,
        );
    }

    /// One-sentence description centered at `y_fraction` of the height.
    fn caption(&self, canvas: &mut Canvas, text: &str, y_fraction: f64) {
        let (width, height) = (canvas.width(), canvas.height());
        let font = self.fonts.resolve(font_px(height, 0.03), false);
        canvas.draw_text_wrapped(
            ((width / 2) as f32, frac(height, y_fraction) as f32),
            text,
            &font,
            self.palette.text_dark,
            frac(width, 0.9) as f32,
        );
    }
}

/// Font size for a fraction of a canvas dimension, at least one pixel.
fn font_px(dim: u32, fraction: f64) -> u32 {
    frac(dim, fraction).max(1) as u32
}

/// Outcome of a promo run.
#[derive(Debug, Default)]
pub struct PromoReport {
    pub generated: Vec<PathBuf>,
    pub failed: Vec<(String, Error)>,
}

impl PromoReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render and save every promo image.
///
/// Only a missing output directory is fatal; a failing image is reported and
/// the rest of the batch still runs.
pub fn generate_promo_images(options: &PromoOptions) -> Result<PromoReport> {
    ensure_output_dir(&options.output)?;

    let requirements = StoreRequirements::load()?;
    let palette = Palette::load()?;
    let fonts = FontResolver::system();
    let scene = Scene {
        fonts: &fonts,
        palette: &palette,
        options,
    };

    println!("Generating Chrome Web Store promotional images...");
    let mut report = PromoReport::default();

    for image in plan(&requirements) {
        let filename = image.file_name();
        let output_path = options.output.join(&filename);

        let saved = image
            .render(&scene)
            .and_then(|canvas| save_png(&canvas, &output_path));

        match saved {
            Ok(()) => {
                println!("  ✓ Generated {filename}");
                report.generated.push(output_path);
            }
            Err(err) => {
                println!("  ✗ Failed to generate {filename}: {err:#}");
                warn!("Skipping {filename}: {err:#}");
                report.failed.push((filename, err));
            }
        }
    }

    if report.is_complete() {
        println!("All promotional images generated successfully!");
    } else {
        println!(
            "Generated {} images, {} failed",
            report.generated.len(),
            report.failed.len()
        );
    }
    println!("Images saved to: {}", options.output.display());

    println!("Chrome Web Store requirements:");
    for line in requirements.summary_lines() {
        println!("  • {line}");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn render(image: PromoImage) -> Canvas {
        let fonts = FontResolver::with_candidates(Vec::new(), Vec::new());
        let palette = Palette::load().unwrap();
        let options = PromoOptions::default();
        let scene = Scene {
            fonts: &fonts,
            palette: &palette,
            options: &options,
        };
        image.render(&scene).unwrap()
    }

    fn count(canvas: &Canvas, color: Rgba<u8>) -> usize {
        canvas.image().pixels().filter(|&&px| px == color).count()
    }

    #[test]
    fn test_plan_covers_listing() {
        let images = plan(&StoreRequirements::load().unwrap());
        let names: Vec<String> = images.iter().map(PromoImage::file_name).collect();

        assert_eq!(images.len(), 8);
        assert_eq!(names[0], "screenshot_1_1280x800.png");
        assert_eq!(names[1], "screenshot_1_640x400.png");
        assert_eq!(names[5], "screenshot_3_640x400.png");
        assert_eq!(names[6], "small_promo_tile_440x280.png");
        assert_eq!(names[7], "marquee_promo_tile_1400x560.png");
    }

    #[test]
    fn test_every_image_renders_at_its_size() {
        for image in plan(&StoreRequirements::load().unwrap()) {
            let canvas = render(image);
            let dims = image.dimensions();
            assert_eq!(
                (canvas.width(), canvas.height()),
                (dims.width, dims.height),
                "{}",
                image.file_name()
            );
        }
    }

    #[test]
    fn test_typing_scene_draws_window_and_progress() {
        let palette = Palette::load().unwrap();
        let canvas = render(PromoImage::Screenshot(
            Screenshot::Typing,
            Dimensions {
                width: 1280,
                height: 800,
            },
        ));

        // Window fill sits inside the 10% side padding
        assert_eq!(*canvas.image().get_pixel(640, 500), palette.surface);
        assert_eq!(*canvas.image().get_pixel(60, 500), palette.background);
        assert!(count(&canvas, palette.success) > 0, "typed characters in green");
        assert!(count(&canvas, palette.primary) > 0, "cursor block");
    }

    #[test]
    fn test_use_case_cards_are_outlined() {
        let palette = Palette::load().unwrap();
        let canvas = render(PromoImage::Screenshot(
            Screenshot::UseCases,
            Dimensions {
                width: 640,
                height: 400,
            },
        ));

        // Three cards along the middle row, separated by background
        let row = 200;
        let mut transitions = 0;
        let mut inside = false;
        for x in 0..canvas.width() {
            let on_card = *canvas.image().get_pixel(x, row) != palette.background;
            if on_card && !inside {
                transitions += 1;
            }
            inside = on_card;
        }
        assert_eq!(transitions, 3);
    }

    #[test]
    fn test_tiles_use_brand_background() {
        let palette = Palette::load().unwrap();
        let small = render(PromoImage::SmallTile(Dimensions {
            width: 440,
            height: 280,
        }));
        let marquee = render(PromoImage::MarqueeTile(Dimensions {
            width: 1400,
            height: 560,
        }));

        for tile in [&small, &marquee] {
            assert_eq!(*tile.image().get_pixel(0, 0), palette.primary);
            assert!(count(tile, palette.text) > 0, "white lettering");
        }
    }
}
