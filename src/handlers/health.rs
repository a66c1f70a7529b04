use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Band site API",
            "version": version,
            "endpoints": {
                "content": "/api/inventory, /api/events, /api/videos, /api/bio, /api/lyrics[/:id] (public)",
                "shop": "/api/products, /api/checkout, /api/checkout/complete (public)",
                "auth": "/auth/admin (public - token acquisition)",
                "admin": "/api/admin/{inventory,events,videos,bio,lyrics}[/:id], /api/admin/orders (admin token)",
            }
        }
    }))
}

/// GET /health - reports database connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
