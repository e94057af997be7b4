//! Issuance Data

use serde::Serialize;

use crate::domain::certificates::{
    data::CertificateForm,
    images::DataUrl,
    records::{CertificateRecord, CertificateUuid},
};

/// A certificate that has an identifier and QR code but is not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDraft {
    pub id: CertificateUuid,
    pub verification_url: String,
    pub qr_code: DataUrl,
}

/// A submitted certificate form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueRequest {
    /// Identifier handed out by a draft. A fresh one is generated when absent.
    pub id: Option<CertificateUuid>,
    pub form: CertificateForm,
    pub photo: Option<DataUrl>,
}

/// Non-fatal problems encountered while issuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueWarning {
    PhotoUploadFailed,
    QrCodeUploadFailed,
}

impl IssueWarning {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PhotoUploadFailed => "photo_upload_failed",
            Self::QrCodeUploadFailed => "qr_code_upload_failed",
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::PhotoUploadFailed => "The photo could not be uploaded; the certificate was saved without it",
            Self::QrCodeUploadFailed => "The QR code could not be uploaded; the certificate was saved without it",
        }
    }
}

/// Outcome of a successful issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCertificate {
    pub certificate: CertificateRecord,
    pub warnings: Vec<IssueWarning>,
    pub view_path: String,
}
