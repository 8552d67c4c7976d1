//! Writing finished canvases to disk as 24-bit PNG files.

use crate::canvas::Canvas;
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Create the output directory (and its parents) if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Can't create output directory {}", dir.display()))
}

/// Flatten the canvas to 24-bit RGB, dropping the alpha channel.
pub fn to_rgb(canvas: &Canvas) -> RgbImage {
    image::DynamicImage::ImageRgba8(canvas.image().clone()).to_rgb8()
}

/// Save the canvas as an RGB PNG at `path`.
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let rgb = to_rgb(canvas);

    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(&rgb, &mut out).with_context(|| format!("Failed to write {}", path.display()))?;
    out.flush()?;

    Ok(())
}

// Encode RGB data as PNG with compression
fn write_png<W: Write>(image: &RgbImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_save_png_drops_alpha() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("translucent.png");

        let canvas = Canvas::new(8, 4, Rgba([10, 20, 30, 40])).unwrap();
        save_png(&canvas, &path).unwrap();

        let saved = image::open(&path).expect("Failed to load saved PNG");
        assert_eq!(saved.color(), ColorType::Rgb8);
        assert_eq!((saved.width(), saved.height()), (8, 4));
        assert_eq!(saved.to_rgb8().get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_ensure_output_dir_creates_parents() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("a").join("b");

        ensure_output_dir(&nested).unwrap();
        ensure_output_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_save_png_reports_path_on_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing").join("icon16.png");

        let canvas = Canvas::new(1, 1, Rgba([0, 0, 0, 255])).unwrap();
        let err = save_png(&canvas, &missing).unwrap_err();
        assert!(format!("{err:#}").contains("icon16.png"));
    }
}
