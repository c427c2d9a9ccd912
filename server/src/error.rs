use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every variant's display string is what the caller sees. Anything more
/// specific (validator detail, provider bodies) belongs in the logs.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input. Please check your form data.")]
    InvalidInput,

    #[error("Please take your time filling the form.")]
    TooFast,

    #[error("Security verification failed. Please try again.")]
    VerificationFailed,

    #[error("Failed to send message. Please try again later.")]
    Dispatch,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidInput | AppError::TooFast | AppError::VerificationFailed => {
                StatusCode::BAD_REQUEST
            }
            AppError::Dispatch => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
