//! Verification QR codes.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode, types::QrError};
use thiserror::Error;

/// Smallest edge length, in pixels, of a rendered QR code.
pub const QR_MIN_SIZE: u32 = 150;

#[derive(Debug, Error)]
pub enum QrCodeError {
    #[error("payload does not fit in a QR code")]
    Encode(#[from] QrError),

    #[error("failed to encode QR image")]
    Image(#[from] image::ImageError),
}

/// Render `payload` at error-correction level H, at least `min_size` pixels
/// square.
///
/// # Errors
///
/// Returns an error when the payload is too long for a QR code.
pub fn render(payload: &str, min_size: u32) -> Result<GrayImage, QrCodeError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;

    Ok(code
        .render::<Luma<u8>>()
        .min_dimensions(min_size, min_size)
        .build())
}

/// Render `payload` as PNG bytes.
///
/// # Errors
///
/// Returns an error when the payload is too long for a QR code or the image
/// cannot be encoded.
pub fn render_png(payload: &str) -> Result<Vec<u8>, QrCodeError> {
    let image = DynamicImage::ImageLuma8(render(payload, QR_MIN_SIZE)?);
    let mut encoded = Vec::new();

    image.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)?;

    Ok(encoded)
}
