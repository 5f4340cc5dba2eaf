//! Downscaling of shared photos before upload.

use std::borrow::Cow;
use std::io::Cursor;

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView};

use crate::{Error, Result};

/// Only this MIME type is decoded and re-encoded; everything else is sent as-is.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// Bounds and quality used when re-encoding a JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleOptions {
    /// Maximum output width in pixels.
    pub max_width: u32,
    /// Maximum output height in pixels.
    pub max_height: u32,
    /// JPEG quality of the re-encoded image.
    pub jpeg_quality: u8,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            max_width: 2000,
            max_height: 2000,
            jpeg_quality: 75,
        }
    }
}

/// Downscale a JPEG with the default bounds, passing other formats through.
pub fn scale_image<'a>(source: &'a [u8], mime_type: &str) -> Result<Cow<'a, [u8]>> {
    scale_image_with(source, mime_type, ScaleOptions::default())
}

/// Downscale a JPEG so that it fits the configured bounds.
///
/// Non-JPEG input is returned untouched without a decode attempt. JPEG input
/// is always re-encoded at `options.jpeg_quality`, even when no resize is
/// needed. Images are never upscaled.
pub fn scale_image_with<'a>(
    source: &'a [u8],
    mime_type: &str,
    options: ScaleOptions,
) -> Result<Cow<'a, [u8]>> {
    if mime_type != JPEG_MIME_TYPE {
        return Ok(Cow::Borrowed(source));
    }

    let decoded = image::load_from_memory(source)
        .map_err(|error| Error::Decode(format!("Failed to decode shared image: {error}")))?;

    let (width, height) = decoded.dimensions();
    let resized = match scaled_dimensions(width, height, options) {
        Some((new_width, new_height)) => {
            tracing::debug!(width, height, new_width, new_height, "Downscaling shared image");
            decoded.resize_exact(new_width, new_height, FilterType::Triangle)
        }
        None => decoded,
    };

    encode_jpeg(&resized, options.jpeg_quality).map(Cow::Owned)
}

/// Target dimensions, or `None` when the image already fits.
///
/// The factor divides the height bound by the width and the width bound by
/// the height. With square bounds this is the usual fit-inside scale.
fn scaled_dimensions(width: u32, height: u32, options: ScaleOptions) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = f32::min(
        options.max_height as f32 / width as f32,
        options.max_width as f32 / height as f32,
    );
    if scale >= 1.0 {
        return None;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let shrink = |dimension: u32| ((dimension as f32 * scale) as u32).max(1);
    Some((shrink(width), shrink(height)))
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    JpegEncoder::new_with_quality(&mut cursor, quality)
        .encode_image(&rgb)
        .map_err(|error| Error::Decode(format!("Failed to encode JPEG: {error}")))?;
    Ok(cursor.into_inner())
}
