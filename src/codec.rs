//! Image loading and transport encoding.
//!
//! Images travel as `data:image/jpeg;base64,...` strings. Loading is the
//! only fatal step of an analysis; encoding failures degrade to an empty
//! string.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use tracing::warn;

use crate::constants::codec::JPEG_DATA_URI_PREFIX;
use crate::constants::limits::MAX_IMAGE_BYTES;
use crate::error::{Error, Result};

/// Detect an image format from its leading bytes.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some(ImageFormat::Png),
        [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(ImageFormat::Tiff),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(ImageFormat::WebP),
        [b'G', b'I', b'F', b'8', b'7' | b'9', ..] => Some(ImageFormat::Gif),
        [b'B', b'M', ..] => Some(ImageFormat::Bmp),
        _ => None,
    }
}

/// Decode an uploaded image.
///
/// # Errors
///
/// Returns [`Error::ImageTooLarge`] above the payload limit and
/// [`Error::ImageDecode`] for empty, unrecognized or corrupt data.
pub fn load_image(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(Error::ImageTooLarge {
            size: bytes.len(),
            max: MAX_IMAGE_BYTES,
        });
    }
    if bytes.is_empty() {
        return Err(Error::ImageDecode {
            reason: "image data is empty".to_string(),
        });
    }

    let format = detect_format(bytes).ok_or_else(|| Error::ImageDecode {
        reason: "unsupported image format".to_string(),
    })?;

    image::load_from_memory_with_format(bytes, format).map_err(|e| Error::ImageDecode {
        reason: e.to_string(),
    })
}

/// Encode an image as JPEG bytes.
///
/// Single-channel images are written as grayscale JPEG without color
/// conversion; every other layout is converted to 8-bit RGB first.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    match image {
        DynamicImage::ImageLuma8(gray) => {
            encoder.encode(gray.as_raw(), gray.width(), gray.height(), ExtendedColorType::L8)?;
        }
        other => {
            let rgb = other.to_rgb8();
            encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
        }
    }

    Ok(buffer.into_inner())
}

/// Encode an image as a JPEG data URI.
///
/// Returns an empty string if encoding fails.
pub fn encode_data_uri(image: &DynamicImage, quality: u8) -> String {
    match encode_jpeg(image, quality) {
        Ok(jpeg) => format!("{JPEG_DATA_URI_PREFIX}{}", STANDARD.encode(jpeg)),
        Err(e) => {
            warn!("Failed to encode image: {e}");
            String::new()
        }
    }
}

/// Decode a JPEG data URI produced by [`encode_data_uri`].
///
/// # Errors
///
/// Returns [`Error::ImageDecode`] if the prefix is missing, the payload
/// is not valid base64, or the image cannot be decoded.
pub fn decode_data_uri(uri: &str) -> Result<DynamicImage> {
    let jpeg = data_uri_bytes(uri)?;
    image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg).map_err(|e| Error::ImageDecode {
        reason: e.to_string(),
    })
}

/// Raw JPEG bytes carried by a data URI.
///
/// # Errors
///
/// Returns [`Error::ImageDecode`] if the prefix is missing or the payload
/// is not valid base64.
pub fn data_uri_bytes(uri: &str) -> Result<Vec<u8>> {
    let payload = uri
        .strip_prefix(JPEG_DATA_URI_PREFIX)
        .ok_or_else(|| Error::ImageDecode {
            reason: "not a JPEG data URI".to_string(),
        })?;

    STANDARD.decode(payload).map_err(|e| Error::ImageDecode {
        reason: format!("invalid base64 payload: {e}"),
    })
}
