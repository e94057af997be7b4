//! Inline image payloads.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io::Cursor,
};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::ImageFormat;
use jiff::Timestamp;
use thiserror::Error;

/// Content type every uploaded image is stored with.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Errors raised while decoding an inline image.
#[derive(Debug, Error)]
pub enum ImageDataError {
    #[error("not a base64 data URL")]
    NotADataUrl,

    #[error("invalid base64 payload")]
    Base64(#[from] base64::DecodeError),

    #[error("unreadable image")]
    Image(#[from] image::ImageError),
}

/// A `data:<media type>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    media_type: String,
    payload: String,
}

impl DataUrl {
    /// Parse a base64 data URL.
    ///
    /// # Errors
    ///
    /// Returns [`ImageDataError::NotADataUrl`] when the value is not a base64
    /// data URL.
    pub fn parse(value: &str) -> Result<Self, ImageDataError> {
        let rest = value
            .trim()
            .strip_prefix("data:")
            .ok_or(ImageDataError::NotADataUrl)?;

        let (header, payload) = rest.split_once(',').ok_or(ImageDataError::NotADataUrl)?;

        let media_type = header
            .strip_suffix(";base64")
            .ok_or(ImageDataError::NotADataUrl)?;

        if payload.is_empty() {
            return Err(ImageDataError::NotADataUrl);
        }

        Ok(Self {
            media_type: media_type.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Wrap PNG bytes.
    #[must_use]
    pub fn from_png(bytes: &[u8]) -> Self {
        Self {
            media_type: PNG_CONTENT_TYPE.to_string(),
            payload: BASE64.encode(bytes),
        }
    }

    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Decode the raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, ImageDataError> {
        Ok(BASE64.decode(self.payload.as_bytes())?)
    }

    /// Decode the payload and re-encode it as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is not valid base64 or not an image.
    pub fn to_png(&self) -> Result<Vec<u8>, ImageDataError> {
        encode_png(&self.decode()?)
    }
}

impl Display for DataUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "data:{};base64,{}", self.media_type, self.payload)
    }
}

/// Re-encode any supported image as PNG.
///
/// # Errors
///
/// Returns an error when `bytes` is not a readable image.
pub fn encode_png(bytes: &[u8]) -> Result<Vec<u8>, ImageDataError> {
    let image = image::load_from_memory(bytes)?;
    let mut encoded = Vec::new();

    image.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)?;

    Ok(encoded)
}

/// Storage object name for an upload made at `at`.
///
/// The millisecond suffix avoids most collisions but two uploads with the
/// same prefix in the same millisecond share a name.
#[must_use]
pub fn object_name(prefix: &str, at: Timestamp) -> String {
    format!("{prefix}_{}.png", at.as_millisecond())
}
