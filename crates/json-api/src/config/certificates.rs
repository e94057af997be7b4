//! Certificate Issuance Config

use clap::Args;

use healthcert_app::domain::certificates::{data::CertificateDefaults, records::Gender};

/// Certificate issuance settings.
#[derive(Debug, Args)]
pub struct CertificatesConfig {
    /// Origin verification links are rooted at
    #[arg(long, env = "PUBLIC_ORIGIN", default_value = "http://localhost:8698")]
    pub public_origin: String,

    /// Facility name used when a form leaves it blank
    #[arg(long, env = "DEFAULT_FACILITY_NAME")]
    pub default_facility_name: Option<String>,

    /// Facility number used when a form leaves it blank
    #[arg(long, env = "DEFAULT_FACILITY_NUMBER")]
    pub default_facility_number: Option<String>,

    /// License number used when a form leaves it blank
    #[arg(long, env = "DEFAULT_LICENSE_NUMBER")]
    pub default_license_number: Option<String>,

    /// Gender used when a form leaves it blank (male, female)
    #[arg(long, env = "DEFAULT_GENDER", value_parser = parse_gender)]
    pub default_gender: Option<Gender>,

    /// Municipality used when a form leaves it blank
    #[arg(long, env = "DEFAULT_MUNICIPALITY")]
    pub default_municipality: Option<String>,
}

impl CertificatesConfig {
    /// Optional-field defaults, with any configured overrides applied.
    #[must_use]
    pub fn defaults(&self) -> CertificateDefaults {
        let mut defaults = CertificateDefaults::default();

        override_with(&mut defaults.facility_name, self.default_facility_name.as_ref());
        override_with(&mut defaults.facility_number, self.default_facility_number.as_ref());
        override_with(&mut defaults.license_number, self.default_license_number.as_ref());
        override_with(&mut defaults.municipality, self.default_municipality.as_ref());

        if let Some(gender) = self.default_gender {
            defaults.gender = gender;
        }

        defaults
    }
}

fn override_with(target: &mut String, value: Option<&String>) {
    if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
        value.trim().clone_into(target);
    }
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    Gender::parse(value).ok_or_else(|| format!("unknown gender {value:?}; expected male or female"))
}
