//! Certificate Search Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use healthcert_app::domain::certificates::data::SearchField;

use crate::{
    certificates::{errors::into_status_error, models::CertificatesResponse},
    extensions::*,
    state::State,
};

/// Certificate Search Handler
///
/// Case-insensitive partial match on `certificate_number` or `id_number`.
#[endpoint(
    tags("certificates"),
    summary = "Search Certificates",
    responses(
        (status_code = StatusCode::OK, description = "Matching certificates"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown field or empty term"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Certificate storage is not configured"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    field: QueryParam<String, true>,
    term: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CertificatesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let field = SearchField::parse(&field.into_inner()).ok_or_else(|| {
        StatusError::bad_request().brief("Search field must be certificate_number or id_number")
    })?;

    let term = term.into_inner().unwrap_or_default();

    if term.trim().is_empty() {
        return Err(StatusError::bad_request().brief("Search term must not be empty"));
    }

    let certificates = state
        .app
        .certificates
        .search_certificates(field, &term)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CertificatesResponse::new(
        certificates,
        &state.app.links,
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use healthcert_app::domain::certificates::{
        CertificatesServiceError, MockCertificatesService, records::CertificateUuid,
    };

    use crate::test_helpers::{certificates_service, make_record};

    use super::*;

    fn make_service(certificates: MockCertificatesService) -> Service {
        certificates_service(
            certificates,
            Router::with_path("certificates/search").get(handler),
        )
    }

    #[tokio::test]
    async fn test_search_by_certificate_number() -> TestResult {
        let id = CertificateUuid::new();
        let mut certificates = MockCertificatesService::new();

        certificates
            .expect_search_certificates()
            .once()
            .withf(|field, term| *field == SearchField::CertificateNumber && term == "c-1")
            .return_once(move |_, _| Ok(vec![make_record(id)]));
        certificates.expect_list_certificates().never();

        let mut res = TestClient::get(
            "http://example.com/certificates/search?field=certificate_number&term=c-1",
        )
        .send(&make_service(certificates))
        .await;

        let body: CertificatesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.certificates.first().map(|certificate| certificate.id),
            Some(id.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_search_empty_term_returns_400_without_service_call() {
        for query in ["field=id_number&term=%20%20", "field=id_number"] {
            let res = TestClient::get(format!("http://example.com/certificates/search?{query}"))
                .send(&make_service(certificates_never()))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "query {query}");
        }
    }

    #[tokio::test]
    async fn test_search_unknown_field_returns_400() {
        let res = TestClient::get("http://example.com/certificates/search?field=name&term=x")
            .send(&make_service(certificates_never()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_search_without_backend_returns_503() {
        let mut certificates = MockCertificatesService::new();

        certificates
            .expect_search_certificates()
            .once()
            .return_once(|_, _| Err(CertificatesServiceError::Unavailable));

        let res = TestClient::get("http://example.com/certificates/search?field=id_number&term=1")
            .send(&make_service(certificates))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    fn certificates_never() -> MockCertificatesService {
        let mut certificates = MockCertificatesService::new();

        certificates.expect_search_certificates().never();
        certificates.expect_list_certificates().never();

        certificates
    }
}
