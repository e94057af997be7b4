//! Create Certificate Handler

use std::sync::Arc;

use salvo::{
    http::{header::LOCATION, request::SecureMaxSize},
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use healthcert_app::domain::{
    certificates::{data::CertificateForm, images::DataUrl, records::Gender},
    issuance::data::{IssueRequest, IssueWarning},
};

use crate::{
    certificates::{errors::issuance_status_error, models::CertificateResponse},
    extensions::*,
    state::State,
};

/// Largest create request accepted, sized for a phone photo sent inline as
/// a base64 data URL.
pub(crate) const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Raises the request body limit for the create route.
pub(crate) fn body_limit() -> SecureMaxSize {
    SecureMaxSize::new(MAX_BODY_BYTES)
}

/// Create Certificate Request
///
/// Every field up to `program_end_date` is required. The remaining ones fall
/// back to the configured defaults when absent or blank.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CreateCertificateRequest {
    /// Identifier from `GET /certificates/new`; generated when absent
    pub id: Option<Uuid>,

    pub name: String,
    pub id_number: String,
    pub nationality: String,
    pub profession: String,
    pub certificate_number: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub program_type: String,
    pub program_end_date: String,

    pub facility_name: Option<String>,
    pub facility_number: Option<String>,
    pub license_number: Option<String>,

    /// `male`, `female`, `ذكر` or `أنثى`
    pub gender: Option<String>,

    pub municipality: Option<String>,

    /// Holder photo as a base64 image data URL
    pub photo: Option<String>,
}

impl CreateCertificateRequest {
    fn into_issue_request(self) -> Result<IssueRequest, StatusError> {
        let gender = match present(self.gender) {
            Some(gender) => Some(
                Gender::parse(&gender)
                    .ok_or_else(|| StatusError::bad_request().brief("Unknown gender"))?,
            ),
            None => None,
        };

        let photo = present(self.photo)
            .map(|photo| DataUrl::parse(&photo))
            .transpose()
            .or_400("Photo must be a base64 image data URL")?;

        Ok(IssueRequest {
            id: self.id.map(Into::into),
            form: CertificateForm {
                name: self.name,
                id_number: self.id_number,
                nationality: self.nationality,
                profession: self.profession,
                certificate_number: self.certificate_number,
                issue_date: self.issue_date,
                expiry_date: self.expiry_date,
                program_type: self.program_type,
                program_end_date: self.program_end_date,
                facility_name: self.facility_name,
                facility_number: self.facility_number,
                license_number: self.license_number,
                gender,
                municipality: self.municipality,
            },
            photo,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Non-fatal issue encountered while saving
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IssueWarningResponse {
    /// Machine-readable warning code
    pub code: String,

    /// Human-readable description
    pub message: String,
}

impl From<IssueWarning> for IssueWarningResponse {
    fn from(warning: IssueWarning) -> Self {
        Self {
            code: warning.code().to_string(),
            message: warning.message().to_string(),
        }
    }
}

/// Certificate Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CertificateCreatedResponse {
    /// The stored certificate
    pub certificate: CertificateResponse,

    /// Image uploads that failed without blocking creation
    pub warnings: Vec<IssueWarningResponse>,

    /// Path of the printable certificate view
    pub view_path: String,
}

/// Create Certificate Handler
#[endpoint(
    tags("certificates"),
    summary = "Create Certificate",
    responses(
        (status_code = StatusCode::CREATED, description = "Certificate created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Certificate storage is not configured"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCertificateRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CertificateCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner().into_issue_request()?;

    let issued = state
        .app
        .issuance
        .issue(request)
        .await
        .map_err(issuance_status_error)?;

    res.add_header(
        LOCATION,
        format!("/certificates/{}", issued.certificate.id),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(CertificateCreatedResponse {
        certificate: CertificateResponse::new(issued.certificate, &state.app.links),
        warnings: issued.warnings.into_iter().map(Into::into).collect(),
        view_path: issued.view_path,
    }))
}
