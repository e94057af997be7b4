//! Backend errors.

use thiserror::Error;

/// Errors that can occur when communicating with the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An HTTP transport, timeout or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx response.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),

    /// The backend accepted a write but returned no row.
    #[error("backend returned no rows")]
    EmptyResponse,

    /// An object URL lies outside the public image bucket.
    #[error("object url is outside the public bucket: {0}")]
    ForeignObject(String),

    /// An object body exceeded [`MAX_OBJECT_BYTES`](super::MAX_OBJECT_BYTES).
    #[error("object exceeds {limit} bytes")]
    ObjectTooLarge { limit: u64 },
}
