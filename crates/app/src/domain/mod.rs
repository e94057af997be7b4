//! Health Certificate Domain Concerns

pub mod certificates;
pub mod export;
pub mod issuance;
pub mod verification;
