//! HTTP route handlers.
//!
//! All handlers are thin - they delegate to the topology coordinator.

use axum::{
    extract::{Query, State},
    http::Method,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::api::AppState;
use crate::error::TonearmResult;
use crate::protocol_constants::SERVICE_ID;
use crate::services::{GroupResult, UngroupResult};

// ─────────────────────────────────────────────────────────────────────────────
// Request Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct GroupQuery {
    speaker: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Read-only for browsers; the players themselves never call us.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/health", get(health_check))
        .route("/group", get(handle_group))
        .route("/ungroup", get(handle_ungroup))
        .route("/api/speakers", get(list_speakers))
        .layer(cors)
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Liveness check. Does not contact any player.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": SERVICE_ID,
    }))
}

/// Groups every speaker under `?speaker=`, or the default speaker when the
/// parameter is absent. A present but empty value names no speaker.
async fn handle_group(
    State(state): State<AppState>,
    Query(query): Query<GroupQuery>,
) -> TonearmResult<Json<GroupResult>> {
    let speaker = query
        .speaker
        .unwrap_or_else(|| state.default_speaker.to_string());

    let result = state.coordinator.group_under(&speaker).await?;
    Ok(Json(result))
}

async fn handle_ungroup(State(state): State<AppState>) -> Json<UngroupResult> {
    Json(state.coordinator.ungroup_all().await)
}

async fn list_speakers(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "speakers": state.coordinator.registry(),
        "default": &*state.default_speaker,
    }))
}
