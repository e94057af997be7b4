//! Issuance errors.

use thiserror::Error;

use crate::domain::{certificates::CertificatesServiceError, issuance::qr::QrCodeError};

#[derive(Debug, Error)]
pub enum IssuanceError {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),

    #[error("certificate backend is not configured")]
    Unavailable,

    #[error("failed to render verification QR code")]
    QrCode(#[from] QrCodeError),

    #[error("failed to create certificate")]
    CreateFailed(#[source] CertificatesServiceError),
}
