use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use trove_types::api::HealthResponse;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK".into(),
        timestamp: chrono::Utc::now(),
        uptime: state.started.elapsed().as_secs(),
    })
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "API is running",
        "status": "OK",
    }))
}
