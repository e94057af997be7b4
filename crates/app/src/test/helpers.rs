//! Test Helpers

use jiff::Timestamp;

use crate::domain::certificates::{
    data::{CertificateDefaults, CertificateForm, NewCertificate},
    records::{CertificateDetails, CertificateRecord, CertificateUuid},
};

pub(crate) fn certificate_form(name: &str, id_number: &str, certificate_number: &str) -> CertificateForm {
    CertificateForm {
        name: name.to_string(),
        id_number: id_number.to_string(),
        nationality: "يمني".to_string(),
        profession: "سائق خاص".to_string(),
        certificate_number: certificate_number.to_string(),
        issue_date: "1446/11/08".to_string(),
        expiry_date: "1447/11/08".to_string(),
        program_type: "متطلبات الغذاء".to_string(),
        program_end_date: "1449/11/03".to_string(),
        ..CertificateForm::default()
    }
}

pub(crate) fn certificate_details(certificate_number: &str) -> CertificateDetails {
    certificate_form("Test User", "123", certificate_number).into_details(&CertificateDefaults::default())
}

pub(crate) fn new_certificate(certificate_number: &str) -> NewCertificate {
    NewCertificate {
        id: CertificateUuid::new(),
        details: certificate_details(certificate_number),
        photo_url: None,
        qr_code_url: None,
    }
}

pub(crate) fn make_record(id: CertificateUuid) -> CertificateRecord {
    let now = Timestamp::now();

    CertificateRecord {
        id,
        details: certificate_details("C-1"),
        photo_url: None,
        qr_code_url: None,
        created_at: now,
        updated_at: now,
    }
}
