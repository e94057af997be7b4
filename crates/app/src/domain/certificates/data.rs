//! Certificates Data

use serde::{Deserialize, Serialize};

use crate::domain::certificates::{
    errors::CertificatesServiceError,
    records::{CertificateDetails, CertificateUuid, Gender},
};

/// New Certificate Data
///
/// The insert payload. The identifier is assigned before persistence so the
/// QR code printed on the certificate already points at the stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCertificate {
    pub id: CertificateUuid,

    #[serde(flatten)]
    pub details: CertificateDetails,

    pub photo_url: Option<String>,
    pub qr_code_url: Option<String>,
}

/// Operator input for a new certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateForm {
    pub name: String,
    pub id_number: String,
    pub nationality: String,
    pub profession: String,
    pub certificate_number: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub program_type: String,
    pub program_end_date: String,
    pub facility_name: Option<String>,
    pub facility_number: Option<String>,
    pub license_number: Option<String>,
    pub gender: Option<Gender>,
    pub municipality: Option<String>,
}

impl CertificateForm {
    /// Fill the optional fields from `defaults`.
    ///
    /// Blank optional values count as absent.
    #[must_use]
    pub fn into_details(self, defaults: &CertificateDefaults) -> CertificateDetails {
        CertificateDetails {
            name: self.name.trim().to_string(),
            id_number: self.id_number.trim().to_string(),
            nationality: self.nationality.trim().to_string(),
            profession: self.profession.trim().to_string(),
            certificate_number: self.certificate_number.trim().to_string(),
            issue_date: self.issue_date.trim().to_string(),
            expiry_date: self.expiry_date.trim().to_string(),
            program_type: self.program_type.trim().to_string(),
            program_end_date: self.program_end_date.trim().to_string(),
            facility_name: or_default(self.facility_name, &defaults.facility_name),
            facility_number: or_default(self.facility_number, &defaults.facility_number),
            license_number: or_default(self.license_number, &defaults.license_number),
            gender: self.gender.unwrap_or(defaults.gender),
            municipality: or_default(self.municipality, &defaults.municipality),
        }
    }
}

/// Values used for the optional certificate fields when none are supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDefaults {
    pub facility_name: String,
    pub facility_number: String,
    pub license_number: String,
    pub gender: Gender,
    pub municipality: String,
}

impl Default for CertificateDefaults {
    fn default() -> Self {
        Self {
            facility_name: "أسواق نوريم غالب بن شافي الشمس التجارية".to_string(),
            facility_number: "7041726855".to_string(),
            license_number: "4100671520174".to_string(),
            gender: Gender::Male,
            municipality: "بلدية مشيرفة".to_string(),
        }
    }
}

/// Column a search is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    CertificateNumber,
    IdNumber,
}

impl SearchField {
    /// Store column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::CertificateNumber => "certificate_number",
            Self::IdNumber => "id_number",
        }
    }

    /// Parse a column name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "certificate_number" => Some(Self::CertificateNumber),
            "id_number" => Some(Self::IdNumber),
            _ => None,
        }
    }
}

/// A trimmed, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Validate a raw search term.
    ///
    /// # Errors
    ///
    /// Returns [`CertificatesServiceError::EmptySearchTerm`] when the term is
    /// blank.
    pub fn parse(value: &str) -> Result<Self, CertificatesServiceError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(CertificatesServiceError::EmptySearchTerm);
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fills_blank_optional_fields_from_defaults() {
        let defaults = CertificateDefaults::default();

        let details = CertificateForm {
            name: " Test User ".to_string(),
            facility_name: Some(String::new()),
            municipality: Some("Riyadh".to_string()),
            ..CertificateForm::default()
        }
        .into_details(&defaults);

        assert_eq!(details.name, "Test User");
        assert_eq!(details.facility_name, defaults.facility_name);
        assert_eq!(details.facility_number, defaults.facility_number);
        assert_eq!(details.municipality, "Riyadh");
        assert_eq!(details.gender, Gender::Male);
    }

    #[test]
    fn search_term_rejects_whitespace() {
        assert!(matches!(
            SearchTerm::parse("   "),
            Err(CertificatesServiceError::EmptySearchTerm)
        ));
    }

    #[test]
    fn search_field_maps_to_columns() {
        assert_eq!(
            SearchField::parse("id_number").map(SearchField::column),
            Some("id_number")
        );
        assert_eq!(SearchField::parse("name"), None);
    }
}
