//! Get Certificate Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    certificates::{errors::into_status_error, models::CertificateResponse},
    extensions::*,
    state::State,
};

/// Get Certificate Handler
///
/// Returns a certificate with its verification links. Also served at
/// `/view/{id}`, the path printed after creation.
#[endpoint(
    tags("certificates"),
    summary = "Get Certificate",
    responses(
        (status_code = StatusCode::OK, description = "Certificate found"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid certificate"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Certificate storage is not configured"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CertificateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let record = state
        .app
        .certificates
        .get_certificate(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CertificateResponse::new(record, &state.app.links)))
}
