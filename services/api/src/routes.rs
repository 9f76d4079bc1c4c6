//! HTTP surface of the API service

use std::any::Any;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ApiError;
use crate::state::AppState;

pub mod users;

/// Build the service router.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/users/register", post(users::register))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "clipstream-api"
    }))
}

/// A panicking handler must not take the process down; it surfaces as the
/// same generic 500 body every other defect does.
fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::internal("Internal server error").into_response()
}
