//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use dosehub_domain::error::{DoseHubError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Status code and client-facing message for an error.
pub(crate) fn classify(err: &DoseHubError) -> (StatusCode, String) {
    match err {
        DoseHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        DoseHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        DoseHubError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
        DoseHubError::MissingElement(_) | DoseHubError::Storage(_) => {
            tracing::error!(error = %err, "internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

/// Maps [`DoseHubError`] to a JSON response with appropriate status code.
pub struct ApiError(DoseHubError);

impl From<DoseHubError> for ApiError {
    fn from(err: DoseHubError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = classify(&self.0);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
