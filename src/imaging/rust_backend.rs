//! Pure Rust optimization backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, WebP) | `image::ImageReader` with guessed format |
//! | Downscale | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality from params) |
//! | Encode → PNG / GIF / WebP | `DynamicImage::save_with_format` |
//!
//! Vector formats (SVG) are not raster images and are reported as
//! [`OptimizeError::Unsupported`]; callers keep the original file.

use super::backend::{ImageOptimizer, OptimizeError};
use super::calculations::fit_within;
use super::params::OptimizeParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Extensions the backend can both decode and re-encode.
const RASTER_FORMATS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("gif", ImageFormat::Gif),
    ("webp", ImageFormat::WebP),
];

fn format_for(path: &Path) -> Option<ImageFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    RASTER_FORMATS
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, format)| *format)
}

/// Whether a file name has an extension this backend can optimize.
pub fn is_optimizable(path: &Path) -> bool {
    format_for(path).is_some()
}

/// Pure Rust backend using the `image` crate.
pub struct RustOptimizer;

impl RustOptimizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, OptimizeError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            OptimizeError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

fn save_image(
    img: &DynamicImage,
    path: &Path,
    format: ImageFormat,
    quality: u32,
) -> Result<(), OptimizeError> {
    match format {
        ImageFormat::Jpeg => {
            let file = std::fs::File::create(path)?;
            let writer = std::io::BufWriter::new(file);
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality as u8);
            // JPEG has no alpha channel
            DynamicImage::ImageRgb8(img.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|e| OptimizeError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
        }
        other => img
            .save_with_format(path, other)
            .map_err(|e| OptimizeError::ProcessingFailed(format!("Encode failed: {}", e))),
    }
}

impl ImageOptimizer for RustOptimizer {
    fn optimize(&self, params: &OptimizeParams) -> Result<(), OptimizeError> {
        let Some(format) = format_for(&params.output) else {
            return Err(OptimizeError::Unsupported(
                params.output.display().to_string(),
            ));
        };
        if !is_optimizable(&params.source) {
            return Err(OptimizeError::Unsupported(
                params.source.display().to_string(),
            ));
        }

        let img = load_image(&params.source)?;
        let (width, height) = fit_within(
            (img.width(), img.height()),
            (params.max_width, params.max_height),
        );
        let resized = if (width, height) == (img.width(), img.height()) {
            img
        } else {
            img.resize_exact(width, height, FilterType::Lanczos3)
        };

        let result = save_image(&resized, &params.output, format, params.quality.value());
        if result.is_err() {
            // never leave a half-written file behind
            let _ = std::fs::remove_file(&params.output);
        }
        result
    }
}
