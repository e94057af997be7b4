//! Certificate Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{certificates::models::CertificatesResponse, extensions::*, state::State};

/// Certificate Index Handler
///
/// Returns every certificate, newest first. Empty when storage is not
/// configured or unreachable.
#[endpoint(tags("certificates"), summary = "List Certificates")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CertificatesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let certificates = state.app.certificates.list_certificates().await;

    Ok(Json(CertificatesResponse::new(
        certificates,
        &state.app.links,
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use healthcert_app::domain::certificates::{MockCertificatesService, records::CertificateUuid};

    use crate::test_helpers::{certificates_service, make_record};

    use super::*;

    fn make_service(certificates: MockCertificatesService) -> Service {
        certificates_service(certificates, Router::with_path("certificates").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_certificates_in_service_order() -> TestResult {
        let newest = CertificateUuid::new();
        let oldest = CertificateUuid::new();

        let mut certificates = MockCertificatesService::new();

        certificates
            .expect_list_certificates()
            .once()
            .return_once(move || vec![make_record(newest), make_record(oldest)]);
        certificates.expect_get_certificate().never();
        certificates.expect_search_certificates().never();

        let mut res = TestClient::get("http://example.com/certificates")
            .send(&make_service(certificates))
            .await;

        let body: CertificatesResponse = res.take_json().await?;
        let ids: Vec<_> = body.certificates.iter().map(|certificate| certificate.id).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(ids, vec![newest.into_uuid(), oldest.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_empty_list() -> TestResult {
        let mut certificates = MockCertificatesService::new();

        certificates
            .expect_list_certificates()
            .once()
            .return_once(Vec::new);
        certificates.expect_search_certificates().never();

        let mut res = TestClient::get("http://example.com/certificates")
            .send(&make_service(certificates))
            .await;

        let body: CertificatesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.certificates.is_empty(), "expected no certificates");

        Ok(())
    }
}
