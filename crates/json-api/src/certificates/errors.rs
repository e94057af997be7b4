//! Certificate Errors

use salvo::http::StatusError;
use tracing::error;

use healthcert_app::domain::{
    certificates::CertificatesServiceError, export::ExportError, issuance::IssuanceError,
};

const NEW_CERTIFICATE_PATH: &str = "/certificates/new";

pub(crate) fn unavailable() -> StatusError {
    StatusError::service_unavailable()
        .brief("Certificate storage is not configured")
        .detail("Set SUPABASE_URL and SUPABASE_ANON_KEY to enable certificate storage")
}

pub(crate) fn invalid_certificate() -> StatusError {
    StatusError::not_found()
        .brief("Invalid certificate")
        .detail(format!(
            "The certificate does not exist or has been removed. Create a new one at {NEW_CERTIFICATE_PATH}"
        ))
}

pub(crate) fn into_status_error(error: CertificatesServiceError) -> StatusError {
    match error {
        CertificatesServiceError::Unavailable => unavailable(),
        CertificatesServiceError::NotFound => invalid_certificate(),
        CertificatesServiceError::EmptySearchTerm => {
            StatusError::bad_request().brief("Search term must not be empty")
        }
        CertificatesServiceError::Backend(source) => {
            error!("certificate backend request failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn issuance_status_error(error: IssuanceError) -> StatusError {
    match error {
        IssuanceError::MissingField(field) => StatusError::bad_request()
            .brief("Required field is empty")
            .detail(format!("`{field}` must not be empty")),
        IssuanceError::Unavailable => unavailable(),
        IssuanceError::QrCode(source) => {
            error!("failed to generate QR code: {source}");

            StatusError::internal_server_error()
        }
        IssuanceError::CreateFailed(source) => {
            error!("failed to save certificate: {source}");

            StatusError::internal_server_error().brief("Failed to save certificate")
        }
    }
}

pub(crate) fn export_status_error(error: ExportError) -> StatusError {
    match error {
        ExportError::NotFound => invalid_certificate(),
        ExportError::Unavailable => unavailable(),
        error => {
            error!("certificate export failed: {error}");

            StatusError::internal_server_error().brief("Export failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        assert_eq!(
            into_status_error(CertificatesServiceError::Unavailable).code,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            into_status_error(CertificatesServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            into_status_error(CertificatesServiceError::EmptySearchTerm).code,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_points_at_certificate_creation() {
        let error = invalid_certificate();

        assert_eq!(error.brief, "Invalid certificate");
        assert!(
            error
                .detail
                .is_some_and(|detail| detail.contains(NEW_CERTIFICATE_PATH)),
            "expected detail to link to certificate creation"
        );
    }

    #[test]
    fn export_failures_are_generic() {
        let error = export_status_error(ExportError::Io(std::io::Error::other("disk full")));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.brief, "Export failed");
        assert_eq!(
            export_status_error(ExportError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }
}
