//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use healthcert_app::{
    context::AppContext,
    domain::{
        certificates::{
            MockCertificatesService,
            records::{CertificateDetails, CertificateRecord, CertificateUuid, Gender},
        },
        export::MockExportService,
        issuance::MockIssuanceService,
        verification::{MockVerificationService, VerificationLinks},
    },
};

use crate::state::State;

pub(crate) const TEST_ORIGIN: &str = "https://certs.example";

/// Service mocks with no expectations beyond `.never()`.
pub(crate) struct TestServices {
    pub certificates: MockCertificatesService,
    pub issuance: MockIssuanceService,
    pub verification: MockVerificationService,
    pub export: MockExportService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            certificates: strict_certificates_mock(),
            issuance: strict_issuance_mock(),
            verification: strict_verification_mock(),
            export: strict_export_mock(),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            certificates: Arc::new(self.certificates),
            issuance: Arc::new(self.issuance),
            verification: Arc::new(self.verification),
            export: Arc::new(self.export),
            links: links(),
        })
    }

    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn links() -> VerificationLinks {
    VerificationLinks::new(TEST_ORIGIN).expect("valid test origin")
}

pub(crate) fn strict_certificates_mock() -> MockCertificatesService {
    let mut certificates = MockCertificatesService::new();

    certificates.expect_is_available().never();
    certificates.expect_create_certificate().never();
    certificates.expect_get_certificate().never();
    certificates.expect_list_certificates().never();
    certificates.expect_search_certificates().never();
    certificates.expect_delete_certificate().never();
    certificates.expect_upload_image().never();
    certificates.expect_download_image().never();

    certificates
}

pub(crate) fn strict_issuance_mock() -> MockIssuanceService {
    let mut issuance = MockIssuanceService::new();

    issuance.expect_draft().never();
    issuance.expect_issue().never();

    issuance
}

pub(crate) fn strict_verification_mock() -> MockVerificationService {
    let mut verification = MockVerificationService::new();

    verification.expect_verify_by_id().never();
    verification.expect_public_verify().never();

    verification
}

pub(crate) fn strict_export_mock() -> MockExportService {
    let mut export = MockExportService::new();

    export.expect_export_certificate().never();

    export
}

pub(crate) fn certificates_service(certificates: MockCertificatesService, route: Router) -> Service {
    TestServices {
        certificates,
        ..TestServices::default()
    }
    .into_service(route)
}

pub(crate) fn issuance_service(issuance: MockIssuanceService, route: Router) -> Service {
    TestServices {
        issuance,
        ..TestServices::default()
    }
    .into_service(route)
}

pub(crate) fn verification_service(
    verification: MockVerificationService,
    route: Router,
) -> Service {
    TestServices {
        verification,
        ..TestServices::default()
    }
    .into_service(route)
}

pub(crate) fn export_service(export: MockExportService, route: Router) -> Service {
    TestServices {
        export,
        ..TestServices::default()
    }
    .into_service(route)
}

pub(crate) fn make_details(certificate_number: &str) -> CertificateDetails {
    CertificateDetails {
        name: "Test User".to_string(),
        id_number: "123".to_string(),
        nationality: "يمني".to_string(),
        profession: "عامل".to_string(),
        certificate_number: certificate_number.to_string(),
        issue_date: "1446/11/08".to_string(),
        expiry_date: "1447/11/08".to_string(),
        program_type: "منشآت غذائية".to_string(),
        program_end_date: "1447/11/08".to_string(),
        facility_name: "Facility".to_string(),
        facility_number: "7041726855".to_string(),
        license_number: "4100671520174".to_string(),
        gender: Gender::Male,
        municipality: "بلدية مشيرفة".to_string(),
    }
}

pub(crate) fn make_record(id: CertificateUuid) -> CertificateRecord {
    CertificateRecord {
        id,
        details: make_details("C-1"),
        photo_url: None,
        qr_code_url: Some(format!("https://cdn.example/qrcode_{id}.png")),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
