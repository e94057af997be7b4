//! Public Verify Handler

use std::sync::Arc;

use salvo::prelude::*;

use healthcert_app::domain::verification::data::VerificationParams;

use crate::{extensions::*, state::State, verification::models::VerificationResponse};

/// Public Verify Handler
///
/// Verifies a parameter-driven link. `id`, `name`, `id_number` and
/// `certificate_number` are required. A store hit is reported with source
/// `store`; otherwise the supplied parameters are echoed back with source
/// `url_parameters`, which nothing vouches for.
#[endpoint(
    tags("verification"),
    summary = "Public Verify Certificate",
    responses(
        (status_code = StatusCode::OK, description = "Certificate accepted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Required parameters missing"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VerificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let params = req
        .parse_queries::<VerificationParams>()
        .or_400("Malformed verification parameters")?;

    let verification = state.app.verification.public_verify(params).await;
    let (status, body) = VerificationResponse::from_verification(verification);

    res.status_code(status);

    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use healthcert_app::domain::verification::{
        MockVerificationService,
        data::{InvalidReason, UnverifiedCertificate, Verification, VerifiedCertificate},
    };

    use crate::{
        test_helpers::{make_details, verification_service},
        verification::models::VerificationSource,
    };

    use super::*;

    fn make_service(verification: MockVerificationService) -> Service {
        verification_service(verification, Router::with_path("public-verify").get(handler))
    }

    #[tokio::test]
    async fn test_public_verify_echoes_url_parameters() -> TestResult {
        let mut verification = MockVerificationService::new();

        verification
            .expect_public_verify()
            .once()
            .withf(|params| {
                params.id.as_deref() == Some("C-1")
                    && params.name.as_deref() == Some("Test User")
                    && params.municipality.is_none()
            })
            .return_once(|_| {
                Verification::Valid(VerifiedCertificate::UrlSupplied(UnverifiedCertificate {
                    id: "C-1".to_string(),
                    details: make_details("C-1"),
                }))
            });
        verification.expect_verify_by_id().never();

        let mut res = TestClient::get(
            "http://example.com/public-verify?id=C-1&name=Test%20User&id_number=123&certificate_number=C-1",
        )
        .send(&make_service(verification))
        .await;

        let body: VerificationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.source, Some(VerificationSource::UrlParameters));
        assert_eq!(
            body.certificate.map(|certificate| certificate.created_at),
            Some(None)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_public_verify_incomplete_parameters_returns_400() -> TestResult {
        let mut verification = MockVerificationService::new();

        verification
            .expect_public_verify()
            .once()
            .return_once(|_| Verification::Invalid(InvalidReason::IncompleteParameters));
        verification.expect_verify_by_id().never();

        let mut res = TestClient::get("http://example.com/public-verify?id=C-1&name=Test")
            .send(&make_service(verification))
            .await;

        let body: VerificationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.reason.as_deref(), Some("incomplete_parameters"));

        Ok(())
    }
}
