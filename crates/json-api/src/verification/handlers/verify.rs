//! Verify Certificate Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, state::State, verification::models::VerificationResponse};

/// Verify Certificate Handler
///
/// Verifies a certificate id strictly against the store. This is the URL
/// encoded in certificate QR codes.
#[endpoint(
    tags("verification"),
    summary = "Verify Certificate",
    responses(
        (status_code = StatusCode::OK, description = "Certificate is valid"),
        (status_code = StatusCode::NOT_FOUND, description = "Certificate does not exist"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Certificate storage is not configured"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Certificate lookup failed"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VerificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let verification = state.app.verification.verify_by_id(&id.into_inner()).await;
    let (status, body) = VerificationResponse::from_verification(verification);

    res.status_code(status);

    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use healthcert_app::domain::{
        certificates::records::CertificateUuid,
        verification::{
            MockVerificationService,
            data::{InvalidReason, Verification, VerifiedCertificate},
        },
    };

    use crate::{
        test_helpers::{make_record, verification_service},
        verification::models::VerificationSource,
    };

    use super::*;

    fn make_service(verification: MockVerificationService) -> Service {
        verification_service(verification, Router::with_path("verify/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_verify_stored_certificate() -> TestResult {
        let id = CertificateUuid::new();
        let mut verification = MockVerificationService::new();

        verification
            .expect_verify_by_id()
            .once()
            .withf(move |requested| requested == id.to_string())
            .return_once(move |_| Verification::Valid(VerifiedCertificate::Stored(make_record(id))));
        verification.expect_public_verify().never();

        let mut res = TestClient::get(format!("http://example.com/verify/{id}"))
            .send(&make_service(verification))
            .await;

        let body: VerificationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.valid, "expected valid certificate");
        assert_eq!(body.source, Some(VerificationSource::Store));
        assert_eq!(
            body.certificate.map(|certificate| certificate.id),
            Some(id.to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_unknown_certificate_returns_404() -> TestResult {
        let mut verification = MockVerificationService::new();

        verification
            .expect_verify_by_id()
            .once()
            .return_once(|_| Verification::Invalid(InvalidReason::NotFound));
        verification.expect_public_verify().never();

        let mut res = TestClient::get("http://example.com/verify/unknown")
            .send(&make_service(verification))
            .await;

        let body: VerificationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(!body.valid, "expected invalid certificate");
        assert_eq!(body.reason.as_deref(), Some("not_found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_without_backend_returns_503() {
        let mut verification = MockVerificationService::new();

        verification
            .expect_verify_by_id()
            .once()
            .return_once(|_| Verification::Invalid(InvalidReason::Unavailable));

        let res = TestClient::get(format!("http://example.com/verify/{}", CertificateUuid::new()))
            .send(&make_service(verification))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }
}
