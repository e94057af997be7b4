//! Verification Models

use salvo::{http::StatusCode, oapi::ToSchema};
use serde::{Deserialize, Serialize};

use healthcert_app::domain::verification::data::{
    InvalidReason, Verification, VerifiedCertificate,
};

use crate::certificates::models::CertificateDetailsResponse;

/// Where a verified certificate's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum VerificationSource {
    /// Confirmed by the certificate store
    Store,

    /// Taken as-is from the link's query parameters; not vouched for
    UrlParameters,
}

/// A certificate accepted by verification.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifiedCertificateResponse {
    /// Certificate identifier as stored or as supplied
    pub id: String,

    /// The printed certificate fields
    pub details: CertificateDetailsResponse,

    pub photo_url: Option<String>,
    pub qr_code_url: Option<String>,

    /// Store creation time; absent for URL-supplied certificates
    pub created_at: Option<String>,
}

/// Verification Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerificationResponse {
    /// Whether the certificate was accepted
    pub valid: bool,

    /// Data source of an accepted certificate
    pub source: Option<VerificationSource>,

    /// The accepted certificate
    pub certificate: Option<VerifiedCertificateResponse>,

    /// Machine-readable rejection reason
    pub reason: Option<String>,

    /// Human-readable rejection message
    pub message: Option<String>,
}

impl VerificationResponse {
    /// Response body and the status it is served with.
    pub(crate) fn from_verification(verification: Verification) -> (StatusCode, Self) {
        match verification {
            Verification::Valid(certificate) => {
                let (source, certificate) = verified(certificate);

                (
                    StatusCode::OK,
                    Self {
                        valid: true,
                        source: Some(source),
                        certificate: Some(certificate),
                        reason: None,
                        message: None,
                    },
                )
            }
            Verification::Invalid(reason) => (
                invalid_status(reason),
                Self {
                    valid: false,
                    source: None,
                    certificate: None,
                    reason: Some(reason_code(reason).to_string()),
                    message: Some(reason.message().to_string()),
                },
            ),
        }
    }
}

fn verified(certificate: VerifiedCertificate) -> (VerificationSource, VerifiedCertificateResponse) {
    match certificate {
        VerifiedCertificate::Stored(record) => (
            VerificationSource::Store,
            VerifiedCertificateResponse {
                id: record.id.to_string(),
                details: record.details.into(),
                photo_url: record.photo_url,
                qr_code_url: record.qr_code_url,
                created_at: Some(record.created_at.to_string()),
            },
        ),
        VerifiedCertificate::UrlSupplied(unverified) => (
            VerificationSource::UrlParameters,
            VerifiedCertificateResponse {
                id: unverified.id,
                details: unverified.details.into(),
                photo_url: None,
                qr_code_url: None,
                created_at: None,
            },
        ),
    }
}

const fn invalid_status(reason: InvalidReason) -> StatusCode {
    match reason {
        InvalidReason::NotFound => StatusCode::NOT_FOUND,
        InvalidReason::IncompleteParameters => StatusCode::BAD_REQUEST,
        InvalidReason::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        InvalidReason::LookupFailed => StatusCode::BAD_GATEWAY,
    }
}

const fn reason_code(reason: InvalidReason) -> &'static str {
    match reason {
        InvalidReason::NotFound => "not_found",
        InvalidReason::IncompleteParameters => "incomplete_parameters",
        InvalidReason::Unavailable => "unavailable",
        InvalidReason::LookupFailed => "lookup_failed",
    }
}
