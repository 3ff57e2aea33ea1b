//! Mapping of store errors onto HTTP responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::handlers::MessageResponse;
use crate::Error;

/// Error returned by every handler; rendered as `{"message": ...}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn malformed_body() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid request body.")
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "album not found")
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            Error::Duplicate { .. } => Self::new(StatusCode::CONFLICT, err.to_string()),
            Error::NotFound(_) => Self::not_found(),
            Error::IdsExhausted | Error::Serialization(_) | Error::Io(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        Self::malformed_body()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(MessageResponse {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}
