//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    backend::{BackendError, CertificateBackend, SupabaseBackend, SupabaseConfig},
    domain::{
        certificates::{CertificatesService, StoreCertificatesService, data::CertificateDefaults},
        export::{ExportService, PdfExportService},
        issuance::{IssuanceService, StoreIssuanceService},
        verification::{InvalidOrigin, StoreVerificationService, VerificationLinks, VerificationService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build backend client")]
    Backend(#[source] BackendError),

    #[error(transparent)]
    Origin(#[from] InvalidOrigin),
}

/// Everything needed to assemble the application services.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend connection; `None` disables every store-backed feature.
    pub backend: Option<SupabaseConfig>,

    /// Origin verification links are rooted at.
    pub public_origin: String,

    pub defaults: CertificateDefaults,
}

#[derive(Clone)]
pub struct AppContext {
    pub certificates: Arc<dyn CertificatesService>,
    pub issuance: Arc<dyn IssuanceService>,
    pub verification: Arc<dyn VerificationService>,
    pub export: Arc<dyn ExportService>,
    pub links: VerificationLinks,
}

impl AppContext {
    /// Build application context from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend client cannot be built or the public
    /// origin is not an absolute URL.
    pub fn new(settings: AppSettings) -> Result<Self, AppInitError> {
        let links = VerificationLinks::new(&settings.public_origin)?;

        let backend: Option<Arc<dyn CertificateBackend>> = match settings.backend {
            Some(config) => {
                info!(url = %config.url, table = %config.table, "using hosted certificate backend");

                Some(Arc::new(
                    SupabaseBackend::new(config).map_err(AppInitError::Backend)?,
                ))
            }
            None => {
                warn!("SUPABASE_URL or SUPABASE_ANON_KEY is not set; certificate storage is disabled");

                None
            }
        };

        let certificates: Arc<dyn CertificatesService> =
            Arc::new(StoreCertificatesService::new(backend));

        Ok(Self {
            issuance: Arc::new(StoreIssuanceService::new(
                certificates.clone(),
                links.clone(),
                settings.defaults.clone(),
            )),
            verification: Arc::new(StoreVerificationService::new(
                certificates.clone(),
                settings.defaults,
            )),
            export: Arc::new(PdfExportService::new(certificates.clone(), links.clone())),
            certificates,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn settings(backend: Option<SupabaseConfig>) -> AppSettings {
        AppSettings {
            backend,
            public_origin: "https://certs.example".to_string(),
            defaults: CertificateDefaults::default(),
        }
    }

    #[test]
    fn missing_backend_leaves_services_unavailable() -> TestResult {
        let context = AppContext::new(settings(None))?;

        assert!(!context.certificates.is_available());
        assert_eq!(context.links.origin(), "https://certs.example");

        Ok(())
    }

    #[test]
    fn configured_backend_is_available() -> TestResult {
        let context = AppContext::new(settings(Some(SupabaseConfig::new(
            "https://abc.supabase.co",
            "anon",
        ))))?;

        assert!(context.certificates.is_available());

        Ok(())
    }

    #[test]
    fn rejects_relative_origin() {
        let result = AppContext::new(AppSettings {
            public_origin: "not a url".to_string(),
            ..settings(None)
        });

        assert!(matches!(result, Err(AppInitError::Origin(_))));
    }
}
