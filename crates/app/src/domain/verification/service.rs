//! Verification service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info, warn};

use crate::domain::{
    certificates::{
        CertificatesService, CertificatesServiceError, data::CertificateDefaults,
        records::{CertificateRecord, CertificateUuid},
    },
    verification::data::{InvalidReason, Verification, VerificationParams, VerifiedCertificate},
};

/// Verifies certificates against the certificate store, falling back to
/// request parameters for parameter-driven links.
#[derive(Clone)]
pub struct StoreVerificationService {
    certificates: Arc<dyn CertificatesService>,
    defaults: CertificateDefaults,
}

impl StoreVerificationService {
    #[must_use]
    pub fn new(certificates: Arc<dyn CertificatesService>, defaults: CertificateDefaults) -> Self {
        Self {
            certificates,
            defaults,
        }
    }

    async fn lookup(&self, id: CertificateUuid) -> Result<CertificateRecord, InvalidReason> {
        self.certificates
            .get_certificate(id)
            .await
            .map_err(|error| match error {
                CertificatesServiceError::NotFound => InvalidReason::NotFound,
                CertificatesServiceError::Unavailable => InvalidReason::Unavailable,
                error => {
                    warn!(%id, "certificate lookup failed: {error}");

                    InvalidReason::LookupFailed
                }
            })
    }
}

impl std::fmt::Debug for StoreVerificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreVerificationService")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl VerificationService for StoreVerificationService {
    async fn verify_by_id(&self, id: &str) -> Verification {
        let Ok(id) = id.parse::<CertificateUuid>() else {
            debug!(id, "verification id is not a certificate id");

            return Verification::Invalid(InvalidReason::NotFound);
        };

        match self.lookup(id).await {
            Ok(record) => Verification::Valid(VerifiedCertificate::Stored(record)),
            Err(reason) => Verification::Invalid(reason),
        }
    }

    async fn public_verify(&self, params: VerificationParams) -> Verification {
        if let Some(missing) = params.missing_required() {
            info!(missing, "incomplete verification parameters");

            return Verification::Invalid(InvalidReason::IncompleteParameters);
        }

        let stored_id = params
            .id
            .as_deref()
            .and_then(|id| id.parse::<CertificateUuid>().ok())
            .filter(|_| self.certificates.is_available());

        if let Some(id) = stored_id {
            match self.lookup(id).await {
                Ok(record) => return Verification::Valid(VerifiedCertificate::Stored(record)),
                Err(reason) => debug!(%id, ?reason, "falling back to supplied parameters"),
            }
        }

        match params.into_unverified(&self.defaults) {
            Some(unverified) => Verification::Valid(VerifiedCertificate::UrlSupplied(unverified)),
            None => Verification::Invalid(InvalidReason::IncompleteParameters),
        }
    }
}

#[automock]
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Verify a certificate id strictly against the store.
    async fn verify_by_id(&self, id: &str) -> Verification;

    /// Verify a parameter-driven link, preferring the stored record when the
    /// store can confirm it.
    async fn public_verify(&self, params: VerificationParams) -> Verification;
}
