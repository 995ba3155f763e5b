// HTTP surface.
// Exposes the status orchestration as JSON and a liveness route.

mod routes;

pub use routes::create_router;

use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::status::{StatusError, StatusService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub status: Arc<StatusService>,
}

impl AppState {
    pub fn new(status: StatusService) -> Self {
        Self {
            status: Arc::new(status),
        }
    }
}

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
