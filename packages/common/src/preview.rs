//! Downscaled preview generation for uploaded images.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

/// Width of generated previews, in pixels.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("could not read image file")]
    Decode(#[source] image::ImageError),
    #[error("image has no pixels")]
    EmptyImage,
    #[error("unsupported output format '{0}'")]
    UnsupportedFormat(String),
    #[error("could not encode preview")]
    Encode(#[source] image::ImageError),
}

/// Height of a preview `preview_width` pixels wide that keeps the aspect ratio
/// of a `width` x `height` original.
///
/// The ratio is computed in floating point and truncated. Never returns 0 so
/// that very wide images still produce an encodable preview.
pub fn preview_height(width: u32, height: u32, preview_width: u32) -> u32 {
    let scaled = (height as f64 / width as f64 * preview_width as f64) as u32;
    scaled.max(1)
}

/// Decode `data`, scale it to `preview_width` with bilinear filtering and
/// re-encode it in the format named by `extension` (e.g. `png`, `jpg`).
pub fn generate_preview(
    data: &[u8],
    extension: &str,
    preview_width: u32,
) -> Result<Vec<u8>, PreviewError> {
    let format = ImageFormat::from_extension(extension)
        .ok_or_else(|| PreviewError::UnsupportedFormat(extension.to_string()))?;

    let original = image::load_from_memory(data).map_err(PreviewError::Decode)?;
    let (width, height) = (original.width(), original.height());
    if width == 0 || height == 0 {
        return Err(PreviewError::EmptyImage);
    }

    let target_height = preview_height(width, height, preview_width);
    tracing::debug!(
        width,
        height,
        preview_width,
        preview_height = target_height,
        "Scaling image for preview"
    );

    let mut preview = original.resize_exact(preview_width, target_height, FilterType::Triangle);
    if format == ImageFormat::Jpeg {
        // JPEG has no alpha channel.
        preview = DynamicImage::ImageRgb8(preview.to_rgb8());
    }

    let mut buf = Cursor::new(Vec::new());
    preview
        .write_to(&mut buf, format)
        .map_err(PreviewError::Encode)?;
    Ok(buf.into_inner())
}
