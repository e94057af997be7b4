//! Verification links.

use reqwest::Url;
use thiserror::Error;

use crate::domain::certificates::records::{CertificateRecord, CertificateUuid};

/// The configured public origin is not an absolute URL.
#[derive(Debug, Error)]
#[error("invalid public origin {origin:?}")]
pub struct InvalidOrigin {
    origin: String,
}

/// Builds the URLs printed on, and encoded into, certificates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationLinks {
    origin: String,
    public_verify: Url,
}

impl VerificationLinks {
    /// Create links rooted at `origin`, e.g. `"https://certs.example"`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOrigin`] when `origin` is not an absolute URL.
    pub fn new(origin: &str) -> Result<Self, InvalidOrigin> {
        let origin = origin.trim().trim_end_matches('/').to_string();

        let Some(public_verify) = Url::parse(&format!("{origin}/public-verify"))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
        else {
            return Err(InvalidOrigin { origin });
        };

        Ok(Self {
            origin,
            public_verify,
        })
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// URL encoded into the QR code of the certificate with `id`.
    #[must_use]
    pub fn verify_url(&self, id: CertificateUuid) -> String {
        format!("{}/verify/{id}", self.origin)
    }

    /// Path the operator is sent to after issuing a certificate.
    #[must_use]
    pub fn view_path(id: CertificateUuid) -> String {
        format!("/view/{id}")
    }

    /// Parameter-driven verification URL carrying the whole record.
    #[must_use]
    pub fn public_verify_url(&self, record: &CertificateRecord) -> String {
        let details = &record.details;
        let mut url = self.public_verify.clone();

        url.query_pairs_mut()
            .append_pair("id", &record.id.to_string())
            .append_pair("name", &details.name)
            .append_pair("id_number", &details.id_number)
            .append_pair("certificate_number", &details.certificate_number)
            .append_pair("nationality", &details.nationality)
            .append_pair("profession", &details.profession)
            .append_pair("issue_date", &details.issue_date)
            .append_pair("expiry_date", &details.expiry_date)
            .append_pair("program_type", &details.program_type)
            .append_pair("program_end_date", &details.program_end_date)
            .append_pair("facility_name", &details.facility_name)
            .append_pair("facility_number", &details.facility_number)
            .append_pair("license_number", &details.license_number)
            .append_pair("gender", details.gender.as_str())
            .append_pair("municipality", &details.municipality);

        url.into()
    }
}
