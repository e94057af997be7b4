//! Export Certificate Handler

use std::{fmt::Write as _, sync::Arc};

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    oapi::extract::PathParam,
    prelude::*,
};
use uuid::Uuid;

use healthcert_app::domain::export::data::ExportedPdf;

use crate::{certificates::errors::export_status_error, extensions::*, state::State};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Export Certificate Handler
///
/// Renders the certificate as a single-page PDF download.
#[endpoint(
    tags("certificates"),
    summary = "Export Certificate PDF",
    responses(
        (status_code = StatusCode::OK, description = "PDF document"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid certificate"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Certificate storage is not configured"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Export failed"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let exported = state
        .app
        .export
        .export_certificate(id.into_inner().into())
        .await
        .map_err(export_status_error)?;

    res.add_header(CONTENT_TYPE, PDF_CONTENT_TYPE, true)
        .or_500("failed to set content type header")?
        .add_header(CONTENT_DISPOSITION, content_disposition(&exported), true)
        .or_500("failed to set content disposition header")?
        .write_body(exported.bytes)
        .or_500("failed to write export body")?;

    Ok(StatusCode::OK)
}

/// Attachment header with an ASCII fallback name and the UTF-8 display name.
fn content_disposition(exported: &ExportedPdf) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        exported.file_name,
        percent_encode(exported.download_name)
    )
}

/// RFC 5987 `value-chars` encoding.
fn percent_encode(value: &str) -> String {
    value.bytes().fold(String::new(), |mut encoded, byte| {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(char::from(byte));
        } else {
            _ = write!(encoded, "%{byte:02X}");
        }

        encoded
    })
}
