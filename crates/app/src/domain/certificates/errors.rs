//! Certificates service errors.

use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum CertificatesServiceError {
    #[error("certificate backend is not configured")]
    Unavailable,

    #[error("certificate not found")]
    NotFound,

    #[error("search term is empty")]
    EmptySearchTerm,

    #[error("backend error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for CertificatesServiceError {
    fn from(error: BackendError) -> Self {
        Self::Backend(error)
    }
}
