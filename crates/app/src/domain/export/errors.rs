//! Export errors.

use thiserror::Error;
use tokio::task::JoinError;

use crate::domain::{
    certificates::CertificatesServiceError, export::text::FontError, issuance::qr::QrCodeError,
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("certificate not found")]
    NotFound,

    #[error("certificate backend is not configured")]
    Unavailable,

    #[error("failed to fetch certificate")]
    Lookup(#[source] CertificatesServiceError),

    #[error("failed to capture certificate")]
    Capture(#[from] QrCodeError),

    #[error("failed to load certificate fonts")]
    Font(#[from] FontError),

    #[error("failed to encode certificate image")]
    Image(#[from] image::ImageError),

    #[error("failed to build PDF")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to write PDF")]
    Io(#[from] std::io::Error),

    #[error("export task failed")]
    Task(#[from] JoinError),
}

impl From<CertificatesServiceError> for ExportError {
    fn from(error: CertificatesServiceError) -> Self {
        match error {
            CertificatesServiceError::NotFound => Self::NotFound,
            CertificatesServiceError::Unavailable => Self::Unavailable,
            error => Self::Lookup(error),
        }
    }
}
