//! Issuance service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::domain::{
    certificates::{
        CertificatesService, CertificatesServiceError,
        data::{CertificateDefaults, NewCertificate},
        images::DataUrl,
        records::CertificateUuid,
    },
    issuance::{
        data::{CertificateDraft, IssueRequest, IssueWarning, IssuedCertificate},
        errors::IssuanceError,
        qr,
    },
    verification::VerificationLinks,
};

/// Issues certificates through the certificate store.
#[derive(Clone)]
pub struct StoreIssuanceService {
    certificates: Arc<dyn CertificatesService>,
    links: VerificationLinks,
    defaults: CertificateDefaults,
}

impl StoreIssuanceService {
    #[must_use]
    pub fn new(
        certificates: Arc<dyn CertificatesService>,
        links: VerificationLinks,
        defaults: CertificateDefaults,
    ) -> Self {
        Self {
            certificates,
            links,
            defaults,
        }
    }

    fn qr_code(&self, id: CertificateUuid) -> Result<(String, DataUrl), IssuanceError> {
        let verification_url = self.links.verify_url(id);
        let png = qr::render_png(&verification_url)?;

        Ok((verification_url, DataUrl::from_png(&png)))
    }

    async fn upload(
        &self,
        image: &DataUrl,
        prefix: String,
        warning: IssueWarning,
        warnings: &mut Vec<IssueWarning>,
    ) -> Result<Option<String>, IssuanceError> {
        match self.certificates.upload_image(image, &prefix).await {
            Ok(Some(url)) => Ok(Some(url)),
            Ok(None) => {
                warn!(%prefix, "{}", warning.message());
                warnings.push(warning);

                Ok(None)
            }
            Err(CertificatesServiceError::Unavailable) => Err(IssuanceError::Unavailable),
            Err(source) => {
                warn!(%prefix, "image upload failed: {source}");
                warnings.push(warning);

                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for StoreIssuanceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreIssuanceService")
            .field("links", &self.links)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IssuanceService for StoreIssuanceService {
    fn draft(&self) -> Result<CertificateDraft, IssuanceError> {
        let id = CertificateUuid::new();
        let (verification_url, qr_code) = self.qr_code(id)?;

        Ok(CertificateDraft {
            id,
            verification_url,
            qr_code,
        })
    }

    async fn issue(&self, request: IssueRequest) -> Result<IssuedCertificate, IssuanceError> {
        let details = request.form.into_details(&self.defaults);

        if let Some(field) = details.missing_required_field() {
            return Err(IssuanceError::MissingField(field));
        }

        if !self.certificates.is_available() {
            return Err(IssuanceError::Unavailable);
        }

        let id = request.id.unwrap_or_default();
        let (_, qr_code) = self.qr_code(id)?;
        let mut warnings = Vec::new();

        let photo_url = match &request.photo {
            Some(photo) => {
                self.upload(
                    photo,
                    format!("photo_{id}"),
                    IssueWarning::PhotoUploadFailed,
                    &mut warnings,
                )
                .await?
            }
            None => None,
        };

        let qr_code_url = self
            .upload(
                &qr_code,
                format!("qrcode_{id}"),
                IssueWarning::QrCodeUploadFailed,
                &mut warnings,
            )
            .await?;

        let certificate = self
            .certificates
            .create_certificate(NewCertificate {
                id,
                details,
                photo_url,
                qr_code_url,
            })
            .await
            .map_err(|source| match source {
                CertificatesServiceError::Unavailable => IssuanceError::Unavailable,
                source => IssuanceError::CreateFailed(source),
            })?;

        info!(%id, warnings = warnings.len(), "issued certificate");

        Ok(IssuedCertificate {
            view_path: VerificationLinks::view_path(certificate.id),
            certificate,
            warnings,
        })
    }
}

#[automock]
#[async_trait]
pub trait IssuanceService: Send + Sync {
    /// Prepare a new certificate: a fresh identifier, its verification URL
    /// and QR code. Nothing is stored.
    fn draft(&self) -> Result<CertificateDraft, IssuanceError>;

    /// Validate, upload images and store a certificate.
    async fn issue(&self, request: IssueRequest) -> Result<IssuedCertificate, IssuanceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::certificates::{
            MockCertificatesService, StoreCertificatesService, images::tests::tiny_png,
        },
        test::{backend::InMemoryBackend, helpers::certificate_form},
    };

    use super::*;

    fn links() -> VerificationLinks {
        VerificationLinks::new("https://certs.example").expect("valid origin")
    }

    fn service(certificates: Arc<dyn CertificatesService>) -> StoreIssuanceService {
        StoreIssuanceService::new(certificates, links(), CertificateDefaults::default())
    }

    fn store(backend: Arc<InMemoryBackend>) -> Arc<StoreCertificatesService> {
        Arc::new(StoreCertificatesService::new(Some(backend)))
    }

    #[test]
    fn draft_points_qr_code_at_verification_url() -> TestResult {
        let draft = service(Arc::new(MockCertificatesService::new())).draft()?;

        assert_eq!(
            draft.verification_url,
            format!("https://certs.example/verify/{}", draft.id)
        );
        assert_eq!(draft.qr_code.media_type(), "image/png");
        assert!(!draft.qr_code.decode()?.is_empty(), "QR code is empty");

        Ok(())
    }

    #[tokio::test]
    async fn issues_certificate_without_photo() -> TestResult {
        let backend = Arc::new(InMemoryBackend::default());
        let certificates = store(backend.clone());
        let issuance = service(certificates.clone());

        let issued = issuance
            .issue(IssueRequest {
                form: certificate_form("Test User", "123", "C-1"),
                ..IssueRequest::default()
            })
            .await?;

        assert!(issued.certificate.photo_url.is_none());
        assert!(issued.certificate.qr_code_url.is_some());
        assert!(issued.warnings.is_empty());
        assert_eq!(issued.view_path, format!("/view/{}", issued.certificate.id));

        let fetched = certificates.get_certificate(issued.certificate.id).await?;

        assert_eq!(fetched.details.name, "Test User");
        assert_eq!(backend.object_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn keeps_draft_identifier() -> TestResult {
        let issuance = service(store(Arc::new(InMemoryBackend::default())));
        let draft = issuance.draft()?;

        let issued = issuance
            .issue(IssueRequest {
                id: Some(draft.id),
                form: certificate_form("Test User", "123", "C-1"),
                photo: Some(DataUrl::from_png(&tiny_png())),
            })
            .await?;

        assert_eq!(issued.certificate.id, draft.id);
        assert!(issued.certificate.photo_url.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn upload_failures_do_not_block_creation() -> TestResult {
        let backend = Arc::new(InMemoryBackend::failing_uploads());

        let issued = service(store(backend.clone()))
            .issue(IssueRequest {
                form: certificate_form("Test User", "123", "C-1"),
                photo: Some(DataUrl::from_png(&tiny_png())),
                ..IssueRequest::default()
            })
            .await?;

        assert!(issued.certificate.photo_url.is_none());
        assert!(issued.certificate.qr_code_url.is_none());
        assert_eq!(
            issued.warnings,
            vec![
                IssueWarning::PhotoUploadFailed,
                IssueWarning::QrCodeUploadFailed
            ]
        );
        assert_eq!(backend.row_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn missing_required_field_is_rejected_before_any_call() {
        let mut certificates = MockCertificatesService::new();

        certificates.expect_is_available().never();
        certificates.expect_upload_image().never();
        certificates.expect_create_certificate().never();

        let result = service(Arc::new(certificates))
            .issue(IssueRequest {
                form: certificate_form("Test User", "", "C-1"),
                ..IssueRequest::default()
            })
            .await;

        assert!(
            matches!(result, Err(IssuanceError::MissingField("id_number"))),
            "expected MissingField, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unavailable_backend_blocks_submission_before_uploads() {
        let mut certificates = MockCertificatesService::new();

        certificates.expect_is_available().once().return_const(false);
        certificates.expect_upload_image().never();
        certificates.expect_create_certificate().never();

        let result = service(Arc::new(certificates))
            .issue(IssueRequest {
                form: certificate_form("Test User", "123", "C-1"),
                ..IssueRequest::default()
            })
            .await;

        assert!(matches!(result, Err(IssuanceError::Unavailable)));
    }

    #[tokio::test]
    async fn create_failure_is_fatal() {
        let backend = Arc::new(InMemoryBackend::failing_inserts());

        let result = service(store(backend))
            .issue(IssueRequest {
                form: certificate_form("Test User", "123", "C-1"),
                ..IssueRequest::default()
            })
            .await;

        assert!(matches!(result, Err(IssuanceError::CreateFailed(_))));
    }
}
