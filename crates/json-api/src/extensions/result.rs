//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{error, info};

/// Map any error to an HTTP error.
pub(crate) trait ResultExt<T> {
    /// Logged internal server error.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Bad request whose brief is `brief`.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            info!("rejected request: {brief}: {error}");

            StatusError::bad_request().brief(brief)
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let failed: Result<(), &str> = Err("boom");

        assert_eq!(
            failed.or_500("context").map_err(|error| error.code),
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert_eq!(
            failed.or_400("Bad photo").map_err(|error| (error.code, error.brief)),
            Err((StatusCode::BAD_REQUEST, "Bad photo".to_string()))
        );
    }
}
