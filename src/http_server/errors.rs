//! # HTTP Error Rendering
//!
//! Every handler failure reaches the client through `IntoResponse for
//! BookError`. The status comes from the error itself; this layer only
//! renders the message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::books::BookError;
use crate::observability::{log_event_with_fields, Event};

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: u16,
}

impl From<&BookError> for ErrorResponse {
    fn from(err: &BookError) -> Self {
        Self {
            message: err.to_string(),
            code: err.status_code(),
        }
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::from(&self);

        if status.is_server_error() {
            log_event_with_fields(
                Event::RequestFailed,
                &[("code", status.as_str()), ("message", body.message.as_str())],
            );
        }

        (status, Json(body)).into_response()
    }
}

/// Unreadable request bodies are client errors like any other validation failure
pub fn body_error(rejection: JsonRejection) -> BookError {
    BookError::validation(format!("Invalid request body: {}", rejection.body_text()))
}
