//! Verification Data

use serde::Deserialize;

use crate::domain::certificates::{
    data::CertificateDefaults,
    records::{CertificateDetails, CertificateRecord, Gender},
};

/// Outcome of a verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Valid(VerifiedCertificate),
    Invalid(InvalidReason),
}

/// A certificate accepted by a verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifiedCertificate {
    /// Confirmed by the certificate store.
    Stored(CertificateRecord),

    /// Reconstructed from request parameters only. Nothing vouches for it.
    UrlSupplied(UnverifiedCertificate),
}

/// Certificate data taken as-is from request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnverifiedCertificate {
    pub id: String,
    pub details: CertificateDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    NotFound,
    LookupFailed,
    Unavailable,
    IncompleteParameters,
}

impl InvalidReason {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFound => "The certificate does not exist or has been removed",
            Self::LookupFailed => "The certificate could not be looked up",
            Self::Unavailable => "Certificate storage is not configured",
            Self::IncompleteParameters => "The verification link is missing required data",
        }
    }
}

/// Values a parameter-driven link shows for optional fields it leaves out,
/// beyond those covered by [`CertificateDefaults`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkFallbacks {
    pub nationality: &'static str,
    pub profession: &'static str,
    pub issue_date: &'static str,
    pub expiry_date: &'static str,
    pub program_type: &'static str,
    pub program_end_date: &'static str,
}

/// Fallbacks used by [`VerificationParams::into_unverified`].
pub const LINK_FALLBACKS: LinkFallbacks = LinkFallbacks {
    nationality: "يمني",
    profession: "سائق خاص",
    issue_date: "1446/11/08",
    expiry_date: "1447/11/08",
    program_type: "متطلبات الغذاء",
    program_end_date: "1449/11/03",
};

/// Query parameters of a parameter-driven verification link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VerificationParams {
    pub id: Option<String>,
    pub name: Option<String>,
    pub id_number: Option<String>,
    pub certificate_number: Option<String>,
    pub nationality: Option<String>,
    pub profession: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub program_type: Option<String>,
    pub program_end_date: Option<String>,
    pub facility_name: Option<String>,
    pub facility_number: Option<String>,
    pub license_number: Option<String>,
    pub gender: Option<String>,
    pub municipality: Option<String>,
}

impl VerificationParams {
    /// Name of the first required parameter that is absent or blank.
    #[must_use]
    pub fn missing_required(&self) -> Option<&'static str> {
        [
            ("id", self.id.as_deref()),
            ("name", self.name.as_deref()),
            ("id_number", self.id_number.as_deref()),
            ("certificate_number", self.certificate_number.as_deref()),
        ]
        .into_iter()
        .find(|(_, value)| present(*value).is_none())
        .map(|(name, _)| name)
    }

    /// Build the unverified certificate, filling optional fields from
    /// `defaults` and [`LINK_FALLBACKS`]. Returns `None` when a required
    /// parameter is missing.
    #[must_use]
    pub fn into_unverified(self, defaults: &CertificateDefaults) -> Option<UnverifiedCertificate> {
        let id = present(self.id.as_deref())?.to_string();

        let details = CertificateDetails {
            name: present(self.name.as_deref())?.to_string(),
            id_number: present(self.id_number.as_deref())?.to_string(),
            certificate_number: present(self.certificate_number.as_deref())?.to_string(),
            nationality: text_or(self.nationality, LINK_FALLBACKS.nationality),
            profession: text_or(self.profession, LINK_FALLBACKS.profession),
            issue_date: text_or(self.issue_date, LINK_FALLBACKS.issue_date),
            expiry_date: text_or(self.expiry_date, LINK_FALLBACKS.expiry_date),
            program_type: text_or(self.program_type, LINK_FALLBACKS.program_type),
            program_end_date: text_or(self.program_end_date, LINK_FALLBACKS.program_end_date),
            facility_name: text_or(self.facility_name, &defaults.facility_name),
            facility_number: text_or(self.facility_number, &defaults.facility_number),
            license_number: text_or(self.license_number, &defaults.license_number),
            gender: self
                .gender
                .as_deref()
                .and_then(Gender::parse)
                .unwrap_or(defaults.gender),
            municipality: text_or(self.municipality, &defaults.municipality),
        };

        Some(UnverifiedCertificate { id, details })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn text(value: Option<String>) -> String {
    value.map(|value| value.trim().to_string()).unwrap_or_default()
}

fn text_or(value: Option<String>, default: &str) -> String {
    Some(text(value))
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> VerificationParams {
        VerificationParams {
            id: Some("C-1".to_string()),
            name: Some("Test User".to_string()),
            id_number: Some("123".to_string()),
            certificate_number: Some("C-1".to_string()),
            ..VerificationParams::default()
        }
    }

    #[test]
    fn reports_missing_required_parameter() {
        let params = VerificationParams {
            certificate_number: Some("   ".to_string()),
            ..complete()
        };

        assert_eq!(params.missing_required(), Some("certificate_number"));
        assert_eq!(complete().missing_required(), None);
    }

    #[test]
    fn every_missing_optional_field_is_filled() {
        let defaults = CertificateDefaults::default();

        let unverified = VerificationParams {
            gender: Some("أنثى".to_string()),
            profession: Some("  ".to_string()),
            issue_date: Some("1445/01/01".to_string()),
            ..complete()
        }
        .into_unverified(&defaults);

        let details = unverified.map(|unverified| unverified.details).unwrap_or_default();

        assert_eq!(details.facility_name, defaults.facility_name);
        assert_eq!(details.municipality, defaults.municipality);
        assert_eq!(details.gender, Gender::Female);
        assert_eq!(details.nationality, "يمني");
        assert_eq!(details.profession, "سائق خاص");
        assert_eq!(details.issue_date, "1445/01/01");
        assert_eq!(details.expiry_date, "1447/11/08");
        assert_eq!(details.program_type, "متطلبات الغذاء");
        assert_eq!(details.program_end_date, "1449/11/03");
        assert_eq!(details.name, "Test User");
    }
}
