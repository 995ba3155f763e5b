use axum::{
    Router,
    extract::State,
    http::{
        Method,
        header::{ACCEPT, CONTENT_TYPE, ORIGIN},
    },
    response::{IntoResponse, Json, Response},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use super::AppState;
use crate::status::StatusError;

pub const LIVENESS_TEXT: &str = "Sentinel API is Online 🟢";

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT]);

    Router::new()
        .route("/", get(liveness))
        .route("/api/status", get(status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

async fn status(State(state): State<AppState>) -> Response {
    // Run on its own task so a dropped client connection cannot cancel a
    // regeneration that other callers are waiting on.
    let service = state.status.clone();
    let outcome = tokio::spawn(async move { service.get_status().await }).await;

    match outcome {
        Ok(Ok(response)) => Json(response).into_response(),
        Ok(Err(err)) => err.into_response(),
        Err(join_err) => {
            error!(error = %join_err, "status task failed");
            StatusError::new(join_err.to_string()).into_response()
        }
    }
}
