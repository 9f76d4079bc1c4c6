//! Uniform success envelope

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Success envelope wrapped around every completed request.
///
/// `success` is derived from the status code at construction and cannot be
/// set directly. The HTTP status of the response comes from the envelope
/// itself, so the two never diverge.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    status_code: u16,
    data: T,
    message: String,
    success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }

    /// A 200 envelope with the default message.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data, "Success")
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn success(&self) -> bool {
        self.success
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
