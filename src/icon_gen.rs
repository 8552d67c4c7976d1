use crate::canvas::Canvas;
use crate::export::{ensure_output_dir, save_png};
use crate::font::FontResolver;
use anyhow::Result;
use image::Rgba;
use log::error;
use std::path::PathBuf;

/// Icon sizes shipped with the extension.
pub const DEFAULT_SIZES: [u32; 3] = [16, 32, 128];

/// Glyph height as a fraction of the icon size.
const GLYPH_SCALE: f32 = 0.6;

#[derive(Debug, Clone)]
pub struct IconOptions {
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub background: Rgba<u8>,
    pub color: Rgba<u8>,
    pub glyph: String,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("icons"),
            sizes: DEFAULT_SIZES.to_vec(),
            background: Rgba([0x4A, 0x90, 0xE2, 255]),
            color: Rgba([255, 255, 255, 255]),
            glyph: "T".to_string(),
        }
    }
}

/// File name of the icon for a given size.
pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}

/// Draw one square icon: solid background, bold glyph centered.
pub fn generate_icon(size: u32, options: &IconOptions, fonts: &FontResolver) -> Result<Canvas> {
    let mut canvas = Canvas::new(size, size, options.background)?;

    let font = fonts.resolve((size as f32 * GLYPH_SCALE) as u32, true);
    let center = size as f32 / 2.0;
    canvas.draw_text_centered((center, center), &options.glyph, &font, options.color);

    Ok(canvas)
}

/// Render and save every requested size.
///
/// Stops at the first icon that can't be written.
pub fn generate_icons(options: &IconOptions) -> Result<Vec<PathBuf>> {
    ensure_output_dir(&options.output)?;
    let fonts = FontResolver::system();

    println!("Generating icons...");
    let mut written = Vec::with_capacity(options.sizes.len());

    for &size in &options.sizes {
        let filename = icon_file_name(size);
        let output_path = options.output.join(&filename);

        let saved = generate_icon(size, options, &fonts)
            .and_then(|canvas| save_png(&canvas, &output_path));

        if let Err(err) = saved {
            println!("  ✗ Failed to generate {filename}: {err:#}");
            error!("Icon generation aborted at {filename}");
            return Err(err.context(format!("Failed to generate {filename}")));
        }

        println!("  ✓ Generated {filename} ({size}x{size})");
        written.push(output_path);
    }

    println!("All icons generated successfully!");
    println!("Icons saved to: {}", options.output.display());

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_fonts() -> FontResolver {
        FontResolver::with_candidates(Vec::new(), Vec::new())
    }

    #[test]
    fn test_icon_is_square_with_background_corners() {
        let options = IconOptions::default();

        for size in DEFAULT_SIZES {
            let canvas = generate_icon(size, &options, &builtin_fonts()).unwrap();
            assert_eq!((canvas.width(), canvas.height()), (size, size));
            assert_eq!(*canvas.image().get_pixel(0, size - 1), options.background);
        }
    }

    #[test]
    fn test_glyph_is_drawn_near_center() {
        let options = IconOptions::default();
        let canvas = generate_icon(128, &options, &builtin_fonts()).unwrap();

        // The stem of the "T" runs through the middle of the icon
        let image = canvas.image();
        let hits = (54..74)
            .flat_map(|y| (54..74).map(move |x| (x, y)))
            .filter(|&(x, y)| *image.get_pixel(x, y) == options.color)
            .count();
        assert!(hits > 0, "expected glyph pixels around the center");
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(generate_icon(0, &IconOptions::default(), &builtin_fonts()).is_err());
    }

    #[test]
    fn test_icon_file_name() {
        assert_eq!(icon_file_name(16), "icon16.png");
        assert_eq!(icon_file_name(128), "icon128.png");
    }
}
