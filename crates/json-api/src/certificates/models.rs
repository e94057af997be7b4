//! Certificate Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use healthcert_app::domain::{
    certificates::records::{CertificateDetails, CertificateRecord},
    verification::VerificationLinks,
};

/// Fields printed on a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CertificateDetailsResponse {
    /// Holder name
    pub name: String,

    /// Holder national or residence ID number
    pub id_number: String,

    pub nationality: String,
    pub profession: String,

    /// Certificate number
    pub certificate_number: String,

    /// Issue date, stored as entered (Hijri)
    pub issue_date: String,

    /// Expiry date, stored as entered (Hijri)
    pub expiry_date: String,

    /// Health education program type
    pub program_type: String,

    /// Health education program end date
    pub program_end_date: String,

    pub facility_name: String,
    pub facility_number: String,
    pub license_number: String,

    /// `male` or `female`
    pub gender: String,

    pub municipality: String,
}

impl From<CertificateDetails> for CertificateDetailsResponse {
    fn from(details: CertificateDetails) -> Self {
        Self {
            name: details.name,
            id_number: details.id_number,
            nationality: details.nationality,
            profession: details.profession,
            certificate_number: details.certificate_number,
            issue_date: details.issue_date,
            expiry_date: details.expiry_date,
            program_type: details.program_type,
            program_end_date: details.program_end_date,
            facility_name: details.facility_name,
            facility_number: details.facility_number,
            license_number: details.license_number,
            gender: details.gender.as_str().to_string(),
            municipality: details.municipality,
        }
    }
}

/// A stored certificate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CertificateResponse {
    /// The unique identifier of the certificate
    pub id: Uuid,

    /// The printed certificate fields
    pub details: CertificateDetailsResponse,

    /// Public URL of the holder photo
    pub photo_url: Option<String>,

    /// Public URL of the stored QR code image
    pub qr_code_url: Option<String>,

    /// The date and time the certificate was created
    pub created_at: String,

    /// The date and time the certificate was last updated
    pub updated_at: String,

    /// Store-backed verification URL encoded in the QR code
    pub verification_url: String,

    /// Parameter-driven verification URL carrying every field
    pub public_verify_url: String,
}

impl CertificateResponse {
    pub(crate) fn new(record: CertificateRecord, links: &VerificationLinks) -> Self {
        Self {
            id: record.id.into(),
            verification_url: links.verify_url(record.id),
            public_verify_url: links.public_verify_url(&record),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
            photo_url: record.photo_url,
            qr_code_url: record.qr_code_url,
            details: record.details.into(),
        }
    }
}

/// A list of certificates, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CertificatesResponse {
    /// The list of certificates
    pub certificates: Vec<CertificateResponse>,
}

impl CertificatesResponse {
    pub(crate) fn new(records: Vec<CertificateRecord>, links: &VerificationLinks) -> Self {
        Self {
            certificates: records
                .into_iter()
                .map(|record| CertificateResponse::new(record, links))
                .collect(),
        }
    }
}
