//! Certificate Export

pub mod capture;
pub mod data;
pub mod errors;
pub mod pdf;
pub mod service;
pub mod text;

pub use errors::ExportError;
pub use service::*;
