//! Certificate Verification

pub mod data;
mod links;
pub mod service;

pub use links::{InvalidOrigin, VerificationLinks};
pub use service::*;
