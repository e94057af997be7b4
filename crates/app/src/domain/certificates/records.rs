//! Certificate Records

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

use crate::uuids::TypedUuid;

/// Certificate UUID
pub type CertificateUuid = TypedUuid<CertificateRecord>;

/// Holder gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male holder.
    #[default]
    #[serde(alias = "ذكر")]
    Male,

    /// Female holder.
    #[serde(alias = "أنثى")]
    Female,
}

impl Gender {
    /// Stable lowercase name used in URLs and the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Arabic label printed on certificates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "ذكر",
            Self::Female => "أنثى",
        }
    }

    /// Parse either the stable name or the Arabic label.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "male" | "ذكر" => Some(Self::Male),
            "female" | "أنثى" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Everything printed on a certificate apart from its identity, images and
/// store timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDetails {
    pub name: String,
    pub id_number: String,
    pub nationality: String,
    pub profession: String,
    pub certificate_number: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub program_type: String,
    pub program_end_date: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub facility_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub facility_number: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub license_number: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: Gender,

    #[serde(default, deserialize_with = "null_as_default")]
    pub municipality: String,
}

impl CertificateDetails {
    /// Name of the first required field that is blank, if any.
    #[must_use]
    pub fn missing_required_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("id_number", &self.id_number),
            ("nationality", &self.nationality),
            ("profession", &self.profession),
            ("certificate_number", &self.certificate_number),
            ("issue_date", &self.issue_date),
            ("expiry_date", &self.expiry_date),
            ("program_type", &self.program_type),
            ("program_end_date", &self.program_end_date),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// Certificate Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub id: CertificateUuid,

    #[serde(flatten)]
    pub details: CertificateDetails,

    #[serde(default)]
    pub photo_url: Option<String>,

    #[serde(default)]
    pub qr_code_url: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn deserializes_store_row_with_nulls() -> TestResult {
        let row = json!({
            "id": "6f1c2a52-8d0b-4d6e-9c39-2f4f3c1d9a10",
            "name": "Test User",
            "id_number": "123",
            "nationality": "يمني",
            "profession": "سائق خاص",
            "certificate_number": "C-1",
            "issue_date": "1446/11/08",
            "expiry_date": "1447/11/08",
            "program_type": "متطلبات الغذاء",
            "program_end_date": "1449/11/03",
            "facility_name": null,
            "facility_number": null,
            "license_number": null,
            "gender": null,
            "municipality": null,
            "photo_url": null,
            "qr_code_url": "https://example.supabase.co/storage/v1/object/public/certificates/qr.png",
            "created_at": "2025-05-06T10:00:00.123456+00:00",
            "updated_at": "2025-05-06T10:00:00.123456+00:00"
        });

        let record: CertificateRecord = serde_json::from_value(row)?;

        assert_eq!(record.details.name, "Test User");
        assert_eq!(record.details.facility_name, "");
        assert_eq!(record.details.gender, Gender::Male);
        assert!(record.photo_url.is_none());
        assert!(record.qr_code_url.is_some());

        Ok(())
    }

    #[test]
    fn accepts_arabic_gender_labels() -> TestResult {
        let gender: Gender = serde_json::from_value(json!("أنثى"))?;

        assert_eq!(gender, Gender::Female);
        assert_eq!(Gender::parse("ذكر"), Some(Gender::Male));
        assert_eq!(Gender::parse("other"), None);

        Ok(())
    }

    #[test]
    fn reports_first_blank_required_field() {
        let details = CertificateDetails {
            name: "Test User".to_string(),
            id_number: "  ".to_string(),
            ..CertificateDetails::default()
        };

        assert_eq!(details.missing_required_field(), Some("id_number"));
    }
}
