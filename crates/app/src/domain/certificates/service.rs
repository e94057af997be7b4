//! Certificates service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{error, warn};

use crate::{
    backend::CertificateBackend,
    domain::certificates::{
        data::{NewCertificate, SearchField, SearchTerm},
        errors::CertificatesServiceError,
        images::{self, DataUrl, PNG_CONTENT_TYPE},
        records::{CertificateRecord, CertificateUuid},
    },
};

/// Certificate store backed by the hosted backend, when one is configured.
#[derive(Clone)]
pub struct StoreCertificatesService {
    backend: Option<Arc<dyn CertificateBackend>>,
}

impl StoreCertificatesService {
    #[must_use]
    pub fn new(backend: Option<Arc<dyn CertificateBackend>>) -> Self {
        Self { backend }
    }

    fn backend(&self) -> Result<&dyn CertificateBackend, CertificatesServiceError> {
        self.backend
            .as_deref()
            .ok_or(CertificatesServiceError::Unavailable)
    }
}

impl Debug for StoreCertificatesService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreCertificatesService")
            .field("available", &self.backend.is_some())
            .finish()
    }
}

#[async_trait]
impl CertificatesService for StoreCertificatesService {
    fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    async fn create_certificate(
        &self,
        certificate: NewCertificate,
    ) -> Result<CertificateRecord, CertificatesServiceError> {
        let backend = self.backend()?;

        backend.insert(&certificate).await.map_err(|source| {
            error!(id = %certificate.id, "failed to create certificate: {source}");

            CertificatesServiceError::from(source)
        })
    }

    async fn get_certificate(
        &self,
        id: CertificateUuid,
    ) -> Result<CertificateRecord, CertificatesServiceError> {
        let backend = self.backend()?;

        let mut certificate = backend
            .select_by_id(id)
            .await
            .map_err(|source| {
                error!(%id, "failed to fetch certificate: {source}");

                CertificatesServiceError::from(source)
            })?
            .ok_or(CertificatesServiceError::NotFound)?;

        certificate.photo_url = resolve_public_url(backend, certificate.photo_url);
        certificate.qr_code_url = resolve_public_url(backend, certificate.qr_code_url);

        Ok(certificate)
    }

    async fn list_certificates(&self) -> Vec<CertificateRecord> {
        let Ok(backend) = self.backend() else {
            warn!("certificate backend is not configured; listing nothing");

            return Vec::new();
        };

        backend.select_all().await.unwrap_or_else(|source| {
            error!("failed to list certificates: {source}");

            Vec::new()
        })
    }

    async fn search_certificates(
        &self,
        field: SearchField,
        term: &str,
    ) -> Result<Vec<CertificateRecord>, CertificatesServiceError> {
        let term = SearchTerm::parse(term)?;
        let backend = self.backend()?;

        backend
            .select_matching(field, &term)
            .await
            .map_err(|source| {
                error!(field = field.column(), "failed to search certificates: {source}");

                CertificatesServiceError::from(source)
            })
    }

    async fn delete_certificate(&self, id: CertificateUuid) -> Result<bool, CertificatesServiceError> {
        let backend = self.backend()?;

        match backend.delete_by_id(id).await {
            Ok(()) => Ok(true),
            Err(source) => {
                error!(%id, "failed to delete certificate: {source}");

                Ok(false)
            }
        }
    }

    async fn upload_image(
        &self,
        image: &DataUrl,
        prefix: &str,
    ) -> Result<Option<String>, CertificatesServiceError> {
        let backend = self.backend()?;

        let png = match image.to_png() {
            Ok(png) => png,
            Err(source) => {
                warn!(prefix, "rejected inline image: {source}");

                return Ok(None);
            }
        };

        let name = images::object_name(prefix, Timestamp::now());

        match backend.upload_object(&name, PNG_CONTENT_TYPE, png).await {
            Ok(()) => Ok(Some(backend.public_url(&name))),
            Err(source) => {
                error!(%name, "failed to upload image: {source}");

                Ok(None)
            }
        }
    }

    async fn download_image(&self, url: &str) -> Option<Vec<u8>> {
        let backend = self.backend().ok()?;

        backend
            .download_object(url)
            .await
            .inspect_err(|source| warn!(url, "failed to download image: {source}"))
            .ok()
    }
}

/// Re-resolve a stored image URL that lacks an access query to the
/// bucket's public URL for the same object.
fn resolve_public_url(backend: &dyn CertificateBackend, stored: Option<String>) -> Option<String> {
    let stored = stored?;

    if stored.contains('?') {
        return Some(stored);
    }

    match stored.rsplit('/').next().filter(|name| !name.is_empty()) {
        Some(name) => Some(backend.public_url(name)),
        None => Some(stored),
    }
}

#[automock]
#[async_trait]
pub trait CertificatesService: Send + Sync {
    /// Whether a backend is configured.
    fn is_available(&self) -> bool;

    /// Persist a new certificate and return the stored record.
    async fn create_certificate(
        &self,
        certificate: NewCertificate,
    ) -> Result<CertificateRecord, CertificatesServiceError>;

    /// Retrieve a single certificate with resolved image URLs.
    async fn get_certificate(
        &self,
        id: CertificateUuid,
    ) -> Result<CertificateRecord, CertificatesServiceError>;

    /// Retrieve all certificates, newest first. Failures yield an empty list.
    async fn list_certificates(&self) -> Vec<CertificateRecord>;

    /// Case-insensitive partial match on one field, newest first.
    async fn search_certificates(
        &self,
        field: SearchField,
        term: &str,
    ) -> Result<Vec<CertificateRecord>, CertificatesServiceError>;

    /// Delete a certificate. `Ok(false)` when the backend rejects it.
    async fn delete_certificate(&self, id: CertificateUuid) -> Result<bool, CertificatesServiceError>;

    /// Store an inline image and return its public URL, or `None` when the
    /// image could not be stored.
    async fn upload_image(
        &self,
        image: &DataUrl,
        prefix: &str,
    ) -> Result<Option<String>, CertificatesServiceError>;

    /// Fetch a stored image, or `None` when it cannot be read.
    async fn download_image(&self, url: &str) -> Option<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        backend::{BackendError, MockCertificateBackend},
        domain::certificates::images::tests::tiny_png,
        test::{
            backend::InMemoryBackend,
            helpers::{make_record, new_certificate},
        },
    };

    use super::*;

    fn store(backend: Arc<InMemoryBackend>) -> StoreCertificatesService {
        StoreCertificatesService::new(Some(backend))
    }

    fn unavailable() -> StoreCertificatesService {
        StoreCertificatesService::new(None)
    }

    #[tokio::test]
    async fn create_then_get_returns_same_required_fields() -> TestResult {
        let service = store(Arc::new(InMemoryBackend::default()));
        let new = new_certificate("C-1");

        let created = service.create_certificate(new.clone()).await?;
        let fetched = service.get_certificate(created.id).await?;

        assert_eq!(fetched.id, new.id);
        assert_eq!(fetched.details, new.details);

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_id_returns_not_found() {
        let service = store(Arc::new(InMemoryBackend::default()));

        let result = service.get_certificate(CertificateUuid::new()).await;

        assert!(
            matches!(result, Err(CertificatesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_removes_from_get_and_list() -> TestResult {
        let service = store(Arc::new(InMemoryBackend::default()));

        let kept = service.create_certificate(new_certificate("C-1")).await?;
        let deleted = service.create_certificate(new_certificate("C-2")).await?;

        assert!(service.delete_certificate(deleted.id).await?);

        let result = service.get_certificate(deleted.id).await;
        let ids: Vec<CertificateUuid> = service
            .list_certificates()
            .await
            .iter()
            .map(|certificate| certificate.id)
            .collect();

        assert!(matches!(result, Err(CertificatesServiceError::NotFound)));
        assert_eq!(ids, vec![kept.id]);

        Ok(())
    }

    #[tokio::test]
    async fn list_returns_newest_first() -> TestResult {
        let service = store(Arc::new(InMemoryBackend::default()));

        let first = service.create_certificate(new_certificate("C-1")).await?;
        let second = service.create_certificate(new_certificate("C-2")).await?;

        let ids: Vec<CertificateUuid> = service
            .list_certificates()
            .await
            .iter()
            .map(|certificate| certificate.id)
            .collect();

        assert_eq!(ids, vec![second.id, first.id]);

        Ok(())
    }

    #[tokio::test]
    async fn list_swallows_backend_failure() {
        let mut backend = MockCertificateBackend::new();

        backend.expect_select_all().once().returning(|| {
            Err(BackendError::UnexpectedResponse("boom".to_string()))
        });

        let service = StoreCertificatesService::new(Some(Arc::new(backend)));

        assert!(service.list_certificates().await.is_empty());
    }

    #[tokio::test]
    async fn search_matches_substring_case_insensitively() -> TestResult {
        let service = store(Arc::new(InMemoryBackend::default()));

        let abc = service.create_certificate(new_certificate("ABC-100")).await?;
        let xabc = service.create_certificate(new_certificate("xabc-200")).await?;
        service.create_certificate(new_certificate("ZZZ-300")).await?;

        let ids: Vec<CertificateUuid> = service
            .search_certificates(SearchField::CertificateNumber, "abc")
            .await?
            .iter()
            .map(|certificate| certificate.id)
            .collect();

        assert_eq!(ids, vec![xabc.id, abc.id]);

        Ok(())
    }

    #[tokio::test]
    async fn search_with_empty_term_never_reaches_backend() {
        let mut backend = MockCertificateBackend::new();

        backend.expect_select_matching().never();

        let service = StoreCertificatesService::new(Some(Arc::new(backend)));

        let result = service
            .search_certificates(SearchField::IdNumber, "  ")
            .await;

        assert!(matches!(result, Err(CertificatesServiceError::EmptySearchTerm)));
    }

    #[tokio::test]
    async fn get_resolves_bare_image_paths_to_public_urls() -> TestResult {
        let mut record = make_record(CertificateUuid::new());
        record.photo_url = Some("photo_abc_1.png".to_string());
        record.qr_code_url = Some("https://cdn.example/qrcode_abc_1.png?token=t".to_string());

        let id = record.id;
        let mut backend = MockCertificateBackend::new();

        backend
            .expect_select_by_id()
            .once()
            .withf(move |requested| *requested == id)
            .return_once(move |_| Ok(Some(record)));

        backend
            .expect_public_url()
            .once()
            .withf(|name| name == "photo_abc_1.png")
            .returning(|name| format!("https://abc.supabase.co/storage/v1/object/public/certificates/{name}"));

        let service = StoreCertificatesService::new(Some(Arc::new(backend)));
        let certificate = service.get_certificate(id).await?;

        assert_eq!(
            certificate.photo_url.as_deref(),
            Some("https://abc.supabase.co/storage/v1/object/public/certificates/photo_abc_1.png")
        );
        assert_eq!(
            certificate.qr_code_url.as_deref(),
            Some("https://cdn.example/qrcode_abc_1.png?token=t")
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_false_on_backend_error() -> TestResult {
        let mut backend = MockCertificateBackend::new();

        backend
            .expect_delete_by_id()
            .once()
            .returning(|_| Err(BackendError::UnexpectedResponse("denied".to_string())));

        let service = StoreCertificatesService::new(Some(Arc::new(backend)));

        assert!(!service.delete_certificate(CertificateUuid::new()).await?);

        Ok(())
    }

    #[tokio::test]
    async fn upload_returns_public_url_for_stored_png() -> TestResult {
        let backend = Arc::new(InMemoryBackend::default());
        let service = store(backend.clone());

        let url = service
            .upload_image(&DataUrl::from_png(&tiny_png()), "photo_abc")
            .await?;

        let url = url.unwrap_or_default();

        assert!(
            url.starts_with("memory://certificates/photo_abc_"),
            "unexpected url {url}"
        );
        assert_eq!(backend.object_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn upload_failure_yields_none() -> TestResult {
        let backend = Arc::new(InMemoryBackend::failing_uploads());

        let url = store(backend)
            .upload_image(&DataUrl::from_png(&tiny_png()), "photo_abc")
            .await?;

        assert!(url.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn unreadable_image_is_not_uploaded() -> TestResult {
        let backend = Arc::new(InMemoryBackend::default());

        let url = store(backend.clone())
            .upload_image(&DataUrl::parse("data:image/png;base64,AAEC")?, "photo_abc")
            .await?;

        assert!(url.is_none());
        assert_eq!(backend.object_count(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn unconfigured_backend_fails_closed() -> TestResult {
        let service = unavailable();

        assert!(!service.is_available());
        assert!(service.list_certificates().await.is_empty());
        assert!(service.download_image("https://x/y.png").await.is_none());
        assert!(matches!(
            service.create_certificate(new_certificate("C-1")).await,
            Err(CertificatesServiceError::Unavailable)
        ));
        assert!(matches!(
            service.delete_certificate(CertificateUuid::new()).await,
            Err(CertificatesServiceError::Unavailable)
        ));
        assert!(matches!(
            service.get_certificate(CertificateUuid::new()).await,
            Err(CertificatesServiceError::Unavailable)
        ));
        assert!(matches!(
            service
                .upload_image(&DataUrl::from_png(&tiny_png()), "photo")
                .await,
            Err(CertificatesServiceError::Unavailable)
        ));

        Ok(())
    }
}
