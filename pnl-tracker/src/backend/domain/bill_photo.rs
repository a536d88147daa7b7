//! Bill photos: shrink and re-encode uploaded images so they can live inside
//! a record as a JPEG data URL.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, GenericImageView};
use tracing::debug;

/// Largest accepted input file
pub const MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
/// Longest edge of a stored photo
pub const MAX_DIMENSION: u32 = 1024;
pub const JPEG_QUALITY: u8 = 70;

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, thiserror::Error)]
pub enum BillPhotoError {
    #[error("Image is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
    #[error("Could not read image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Could not encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Not a base64 image data URL")]
    InvalidDataUrl,
}

/// Compress raw image bytes into a `data:image/jpeg;base64,...` URL
pub fn compress_bill_photo(bytes: &[u8]) -> Result<String, BillPhotoError> {
    if bytes.len() > MAX_INPUT_BYTES {
        return Err(BillPhotoError::TooLarge {
            size: bytes.len(),
            limit: MAX_INPUT_BYTES,
        });
    }

    let mut image = image::load_from_memory(bytes).map_err(BillPhotoError::Decode)?;
    let (width, height) = image.dimensions();
    let (target_width, target_height) = scaled_dimensions(width, height, MAX_DIMENSION);
    if (target_width, target_height) != (width, height) {
        image = image.resize_exact(target_width, target_height, FilterType::Triangle);
    }

    let rgb = image.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(BillPhotoError::Encode)?;

    debug!(
        "Compressed bill photo {}x{} ({} bytes) to {}x{} ({} bytes)",
        width,
        height,
        bytes.len(),
        target_width,
        target_height,
        jpeg.len()
    );
    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(&jpeg)))
}

/// Bytes stored in a base64 image data URL
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, BillPhotoError> {
    let (header, payload) = url.split_once(',').ok_or(BillPhotoError::InvalidDataUrl)?;
    if !header.starts_with("data:image/") || !header.ends_with(";base64") {
        return Err(BillPhotoError::InvalidDataUrl);
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|_| BillPhotoError::InvalidDataUrl)
}

/// Fit the longer side within `max`, keeping the aspect ratio
fn scaled_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    if width >= height {
        let scaled = (f64::from(height) * f64::from(max) / f64::from(width)).round() as u32;
        (max, scaled.max(1))
    } else {
        let scaled = (f64::from(width) * f64::from(max) / f64::from(height)).round() as u32;
        (scaled.max(1), max)
    }
}
