//! # Image Processing Module
//!
//! Questo modulo gestisce la trasformazione di una singola immagine:
//! decode → flatten alpha → downscale → re-encode.
//!
//! ## Responsabilità:
//! - Decodifica dell'immagine sorgente con la crate `image`
//! - Flatten del canale alpha quando la destinazione è JPEG (JPEG non ha alpha)
//! - Downscale aspect-preserving entro (max_width × max_height), mai upscale
//! - Re-encoding con qualità configurata e ottimizzazione dimensione
//!
//! ## Encoder per formato:
//! - **JPEG**: `mozjpeg` con progressive mode, optimize coding e scan optimization
//! - **PNG**: encoder `image` con compressione Best e filtering adattivo
//! - **WebP**: crate `webp` in modalità lossy con qualità configurata
//!
//! ## Gestione risorse:
//! Tutto lo stato di decode/encode è scoped alla singola chiamata `transform`:
//! l'immagine decodificata e i buffer encoder vengono rilasciati prima di
//! passare al file successivo.
//!
//! ## Gestione errori:
//! Qualsiasi fallimento di decode, conversione o encode viene restituito come
//! `ConvertError` al chiamante, che lo logga e lo conta senza abortire il run.

use crate::config::Config;
use crate::error::ConvertError;
use crate::file_manager::FileManager;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageEncoder};
use mozjpeg::{ColorSpace, Compress, ScanMode};
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Stateless per-file image transform
pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode, downscale and re-encode a single image.
    ///
    /// The output format follows the destination extension. Never upscales:
    /// images already within the configured bounds keep their dimensions.
    pub fn transform(source: &Path, dest: &Path, config: &Config) -> Result<(), ConvertError> {
        let img = image::open(source)?;
        let (orig_width, orig_height) = img.dimensions();

        // Flatten alpha before a JPEG encode, JPEG has no alpha channel
        let img = if img.color().has_alpha() && FileManager::is_jpeg_extension(dest) {
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        };

        let img = Self::fit_within(img, config.max_width, config.max_height);
        let (width, height) = img.dimensions();
        debug!(
            "{}: {}x{} -> {}x{}",
            source.display(),
            orig_width,
            orig_height,
            width,
            height
        );

        Self::encode(&img, dest, config.quality)
    }

    /// Aspect-preserving downscale so both dimensions fit the bounds.
    /// A no-op ceiling: images already within bounds pass through untouched.
    fn fit_within(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
        let (width, height) = img.dimensions();
        if width <= max_width && height <= max_height {
            img
        } else {
            img.resize(max_width, max_height, FilterType::Lanczos3)
        }
    }

    /// Encode by destination extension
    fn encode(img: &DynamicImage, dest: &Path, quality: u8) -> Result<(), ConvertError> {
        let ext = dest
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" => Self::encode_jpeg(img, dest, quality),
            "png" => Self::encode_png(img, dest),
            "webp" => Self::encode_webp(img, dest, quality),
            other => Err(ConvertError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Progressive JPEG with mozjpeg at the configured quality
    fn encode_jpeg(img: &DynamicImage, dest: &Path, quality: u8) -> Result<(), ConvertError> {
        let rgb = img.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);

        let mut comp = Compress::new(ColorSpace::JCS_RGB);
        comp.set_size(width, height);
        comp.set_quality(quality as f32);
        comp.set_progressive_mode();
        comp.set_scan_optimization_mode(ScanMode::AllComponentsTogether);
        comp.set_optimize_coding(true);

        let mut encoded = Vec::new();
        let mut writer = comp
            .start_compress(&mut encoded)
            .map_err(|e| ConvertError::Encode(format!("mozjpeg: {e}")))?;
        writer
            .write_scanlines(&rgb.into_raw())
            .map_err(|e| ConvertError::Encode(format!("mozjpeg: {e}")))?;
        writer
            .finish()
            .map_err(|e| ConvertError::Encode(format!("mozjpeg: {e}")))?;

        std::fs::write(dest, encoded)?;
        Ok(())
    }

    /// PNG with best compression and adaptive filtering
    fn encode_png(img: &DynamicImage, dest: &Path) -> Result<(), ConvertError> {
        let file = std::fs::File::create(dest)?;
        let writer = BufWriter::new(file);
        let encoder =
            PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilterType::Adaptive);

        let (width, height) = img.dimensions();
        if img.color().has_alpha() {
            let rgba = img.to_rgba8();
            encoder.write_image(rgba.as_raw(), width, height, ColorType::Rgba8)?;
        } else {
            let rgb = img.to_rgb8();
            encoder.write_image(rgb.as_raw(), width, height, ColorType::Rgb8)?;
        }
        Ok(())
    }

    /// Lossy WebP at the configured quality
    fn encode_webp(img: &DynamicImage, dest: &Path, quality: u8) -> Result<(), ConvertError> {
        let rgba = img.to_rgba8();
        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
        let encoded = encoder.encode(quality as f32);
        std::fs::write(dest, &*encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn test_config() -> Config {
        Config::default()
    }

    /// Write a solid-gradient PNG with the given dimensions
    fn create_test_png(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        img.save(path).unwrap();
    }

    fn create_test_rgba_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 64])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_downscale_fits_bounds_preserving_aspect() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("big.png");
        let dest = temp.path().join("out.png");
        create_test_png(&source, 3000, 2000);

        ImageProcessor::transform(&source, &dest, &test_config()).unwrap();

        let (width, height) = image::image_dimensions(&dest).unwrap();
        assert!(width <= 1920 && height <= 1080);
        // Larger relative dimension hits its bound, 3000x2000 is height-limited
        assert_eq!(height, 1080);
        // Aspect ratio preserved within one pixel
        let expected_width = (3000.0 * 1080.0 / 2000.0) as u32;
        assert!((width as i64 - expected_width as i64).abs() <= 1);
    }

    #[test]
    fn test_no_upscaling_for_small_images() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("small.png");
        let dest = temp.path().join("out.png");
        create_test_png(&source, 800, 600);

        ImageProcessor::transform(&source, &dest, &test_config()).unwrap();

        assert_eq!(image::image_dimensions(&dest).unwrap(), (800, 600));
    }

    #[test]
    fn test_alpha_flattened_for_jpeg_destination() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("alpha.png");
        let dest = temp.path().join("out.jpg");
        create_test_rgba_png(&source, 64, 64);

        ImageProcessor::transform(&source, &dest, &test_config()).unwrap();

        let out = image::open(&dest).unwrap();
        assert!(!out.color().has_alpha());
        assert_eq!(out.dimensions(), (64, 64));
    }

    #[test]
    fn test_alpha_preserved_for_png_destination() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("alpha.png");
        let dest = temp.path().join("out.png");
        create_test_rgba_png(&source, 32, 32);

        ImageProcessor::transform(&source, &dest, &test_config()).unwrap();

        assert!(image::open(&dest).unwrap().color().has_alpha());
    }

    #[test]
    fn test_webp_output_decodes_at_same_dimensions() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("photo.png");
        let dest = temp.path().join("out.webp");
        create_test_png(&source, 120, 80);

        ImageProcessor::transform(&source, &dest, &test_config()).unwrap();

        assert_eq!(image::image_dimensions(&dest).unwrap(), (120, 80));
    }

    #[test]
    fn test_corrupt_source_fails_without_panicking() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("corrupt.jpg");
        let dest = temp.path().join("out.jpg");
        std::fs::write(&source, b"this is not an image").unwrap();

        let result = ImageProcessor::transform(&source, &dest, &test_config());
        assert!(result.is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_unsupported_destination_extension() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("photo.png");
        let dest = temp.path().join("out.bmp");
        create_test_png(&source, 10, 10);

        let result = ImageProcessor::transform(&source, &dest, &test_config());
        assert!(matches!(result, Err(ConvertError::UnsupportedFormat(_))));
    }
}
