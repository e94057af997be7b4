//! Certificate Draft Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use healthcert_app::domain::issuance::data::CertificateDraft;

use crate::{certificates::errors::issuance_status_error, extensions::*, state::State};

/// Certificate Draft Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CertificateDraftResponse {
    /// Identifier to submit with the certificate form
    pub id: Uuid,

    /// Verification URL the QR code points at
    pub verification_url: String,

    /// QR code preview as a PNG data URL
    pub qr_code: String,
}

impl From<CertificateDraft> for CertificateDraftResponse {
    fn from(draft: CertificateDraft) -> Self {
        Self {
            id: draft.id.into(),
            verification_url: draft.verification_url,
            qr_code: draft.qr_code.to_string(),
        }
    }
}

/// Certificate Draft Handler
///
/// Reserves an identifier for a new certificate and previews its QR code.
/// Nothing is stored.
#[endpoint(tags("certificates"), summary = "New Certificate Draft")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CertificateDraftResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let draft = state.app.issuance.draft().map_err(issuance_status_error)?;

    Ok(Json(draft.into()))
}
