use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = sqlx::query("SELECT 1")
        .execute(&state.service_context.db_pool)
        .await
        .is_ok();

    let (status, label) = if database_ok {
        (StatusCode::OK, "healthy")
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (status, Json(json!({
        "status": label,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

pub async fn api_info() -> impl IntoResponse {
    Json(ApiInfo {
        name: "Roster API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Member registry".to_string(),
    })
}
