//! Certificate Issuance

pub mod data;
pub mod errors;
pub mod qr;
pub mod service;

pub use errors::IssuanceError;
pub use service::*;
