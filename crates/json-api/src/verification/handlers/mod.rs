//! Verification Handlers

pub(crate) mod public_verify;
pub(crate) mod verify;
