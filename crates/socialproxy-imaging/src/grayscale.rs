use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};

use crate::ImagingError;

/// Decodes `bytes`, converts to grayscale and re-encodes in the source format.
///
/// The format is sniffed from the bytes, not the URL, so a `.jpg` link that
/// serves WebP or TIFF comes back as WebP or TIFF.
///
/// GIF output is written from RGBA because the GIF encoder rejects luma
/// buffers; every pixel still carries equal R, G and B channels.
///
/// # Errors
///
/// - [`ImagingError::Decode`] if the format cannot be detected or decoded.
/// - [`ImagingError::Encode`] if the grayscale image cannot be written back.
pub fn to_grayscale(bytes: &[u8], source: &str) -> Result<Vec<u8>, ImagingError> {
    let decode_err = |e| ImagingError::Decode {
        url: source.to_owned(),
        source: e,
    };
    let format = image::guess_format(bytes).map_err(decode_err)?;
    let decoded = image::load_from_memory_with_format(bytes, format).map_err(decode_err)?;

    let gray = decoded.grayscale();
    let gray = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(gray.to_rgba8()),
        _ => gray,
    };

    let mut out = Cursor::new(Vec::new());
    gray.write_to(&mut out, format).map_err(ImagingError::Encode)?;
    Ok(out.into_inner())
}

/// Standard (padded) base64 of `bytes`.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
