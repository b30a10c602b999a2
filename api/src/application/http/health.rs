use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::application::http::server::app_state::AppState;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/health/live", root_path), get(live))
        .route(&format!("{}/health/ready", root_path), get(ready))
}

async fn live() -> StatusCode {
    StatusCode::OK
}

/// Ready only when meal analysis can actually run.
async fn ready(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.service.is_llm_configured() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "GOOGLE_API_KEY is missing")
    }
}
