use crate::dtos::HealthEnvelope;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness check. Echoes the configured email and never fails, whether or
/// not the AI provider is configured.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthEnvelope> {
    Json(HealthEnvelope {
        is_success: true,
        official_email: state.config.official_email.clone(),
    })
}

/// Readiness check for K8s.
pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}
