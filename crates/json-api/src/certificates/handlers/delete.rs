//! Delete Certificate Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{certificates::errors::into_status_error, extensions::*, state::State};

/// Delete Certificate Handler
#[endpoint(
    tags("certificates"),
    summary = "Delete Certificate",
    responses(
        (status_code = StatusCode::OK, description = "Certificate deleted"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Certificate storage is not configured"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    let deleted = state
        .app
        .certificates
        .delete_certificate(id.into())
        .await
        .map_err(into_status_error)?;

    if !deleted {
        return Err(StatusError::internal_server_error().brief("Failed to delete certificate"));
    }

    info!(%id, "deleted certificate");

    Ok(StatusCode::OK)
}
