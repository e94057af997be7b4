//! Certificates

pub mod data;
pub mod errors;
pub mod images;
pub mod records;
pub mod service;

pub use errors::CertificatesServiceError;
pub use service::*;
