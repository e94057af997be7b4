//! Export service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::domain::{
    certificates::{CertificatesService, records::CertificateUuid},
    export::{capture, data::ExportedPdf, errors::ExportError, pdf},
    verification::VerificationLinks,
};

/// Renders stored certificates as PDF documents.
#[derive(Clone)]
pub struct PdfExportService {
    certificates: Arc<dyn CertificatesService>,
    links: VerificationLinks,
}

impl PdfExportService {
    #[must_use]
    pub fn new(certificates: Arc<dyn CertificatesService>, links: VerificationLinks) -> Self {
        Self {
            certificates,
            links,
        }
    }
}

impl std::fmt::Debug for PdfExportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfExportService")
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ExportService for PdfExportService {
    async fn export_certificate(&self, id: CertificateUuid) -> Result<ExportedPdf, ExportError> {
        let record = self.certificates.get_certificate(id).await?;

        let photo = match &record.photo_url {
            Some(url) => self.certificates.download_image(url).await,
            None => None,
        };

        let verification_url = self.links.verify_url(id);

        let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ExportError> {
            let capture = capture::capture(&record, photo.as_deref(), &verification_url)?;

            pdf::render(&capture, &record, &verification_url)
        })
        .await??;

        info!(%id, size = bytes.len(), "exported certificate");

        Ok(ExportedPdf::new(bytes))
    }
}

#[automock]
#[async_trait]
pub trait ExportService: Send + Sync {
    /// Render the stored certificate with `id` as a single-page PDF.
    async fn export_certificate(&self, id: CertificateUuid) -> Result<ExportedPdf, ExportError>;
}
