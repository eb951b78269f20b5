// handlers/mod.rs - Two-tier handler layout
//
// Public (no session needed) → Protected (session required)
// Each tier's handlers check the session themselves via the service layer,
// so routing stays method-agnostic.
pub mod protected;
pub mod public;

use axum::{extract::State, http::StatusCode};
use serde_json::{json, Value};

use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET / - service descriptor
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "News Agency API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "login": "POST /api/login/ (form: username, password)",
            "logout": "POST /api/logout/ (session)",
            "poststory": "POST /api/poststory/ (session, json: headline, category, region, details)",
            "getstories": "GET /api/getstories/ (json: story_cat, story_region, story_date)",
            "deletestory": "POST /api/deletestory/ (session, json: story_key)",
            "health": "GET /health",
        }
    }))
}

/// GET /health - store reachability
pub async fn health(State(state): State<AppState>) -> ApiResponse<Value> {
    let now = chrono::Utc::now();

    match state.news.health().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
        })),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiResponse::with_status(
                json!({
                    "status": "degraded",
                    "timestamp": now,
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}
