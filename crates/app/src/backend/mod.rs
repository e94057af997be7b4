//! Hosted certificate backend.
//!
//! The backend is a hosted relational table plus a public object-storage
//! bucket. [`CertificateBackend`] is the seam the certificate service talks
//! through; [`SupabaseBackend`] is the HTTP implementation.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::certificates::{
    data::{NewCertificate, SearchField, SearchTerm},
    records::{CertificateRecord, CertificateUuid},
};

mod config;
mod errors;
mod supabase;

pub use config::{DEFAULT_CERTIFICATES_RESOURCE, DEFAULT_TIMEOUT, SupabaseConfig};
pub use errors::BackendError;
pub use supabase::{MAX_OBJECT_BYTES, SupabaseBackend};

/// Record and image operations offered by the hosted backend.
#[automock]
#[async_trait]
pub trait CertificateBackend: Send + Sync {
    /// Insert one row and return it as stored.
    async fn insert(&self, certificate: &NewCertificate) -> Result<CertificateRecord, BackendError>;

    /// Fetch the row with the given id, if any.
    async fn select_by_id(
        &self,
        id: CertificateUuid,
    ) -> Result<Option<CertificateRecord>, BackendError>;

    /// Fetch every row, newest first.
    async fn select_all(&self) -> Result<Vec<CertificateRecord>, BackendError>;

    /// Fetch rows whose `field` contains `term`, ignoring case, newest first.
    async fn select_matching(
        &self,
        field: SearchField,
        term: &SearchTerm,
    ) -> Result<Vec<CertificateRecord>, BackendError>;

    /// Delete the row with the given id.
    async fn delete_by_id(&self, id: CertificateUuid) -> Result<(), BackendError>;

    /// Write an object to the public bucket, replacing any existing one.
    async fn upload_object(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), BackendError>;

    /// Read back an object from the public bucket. URLs outside the bucket
    /// are refused.
    async fn download_object(&self, url: &str) -> Result<Vec<u8>, BackendError>;

    /// Public URL of an object in the bucket.
    fn public_url(&self, name: &str) -> String;
}
