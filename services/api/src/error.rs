//! Structured errors and the single failure-reporting boundary
//!
//! Every fallible handler returns [`ApiResult`]; whatever goes wrong anywhere
//! in a pipeline becomes an [`ApiError`] and surfaces through one
//! `IntoResponse` implementation. Handlers never shape their own error
//! responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::repositories::StoreError;

/// Uniform result type returned by every handler.
pub type ApiResult<T> = Result<T, ApiError>;

/// Structured failure raised at the point a problem is detected.
///
/// Nothing mutates an `ApiError` after construction. `operational`
/// distinguishes expected, user-facing failures (bad input, conflicts) from
/// defects; it only drives log verbosity at the boundary. `cause` is internal
/// diagnostics and is never serialized.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Vec<String>,
    operational: bool,
    cause: Option<anyhow::Error>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
            operational: true,
            cause: None,
        }
    }

    /// Rejected input.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// A uniqueness clash with an existing record.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// A defect rather than an operational failure; the message should
    /// already be generic enough to show a caller.
    pub fn internal(message: impl Into<String>) -> Self {
        let mut err = Self::new(StatusCode::INTERNAL_SERVER_ERROR, message);
        err.operational = false;
        err
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_cause(mut self, cause: anyhow::Error) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn is_operational(&self) -> bool {
        self.operational
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => Self::conflict("User with email or username already exists"),
            StoreError::Backend(cause) => Self::internal("Internal server error").with_cause(cause),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.operational {
            warn!(status = %self.status, "{}", self.message);
        } else {
            match &self.cause {
                Some(cause) => {
                    error!(status = %self.status, cause = ?cause, "{}", self.message);
                }
                None => error!(status = %self.status, "{}", self.message),
            }
        }

        let body = Json(json!({
            "statusCode": self.status.as_u16(),
            "message": self.message,
            "details": self.details,
            "success": false,
        }));

        (self.status, body).into_response()
    }
}
