use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service summary
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Skinalyze API",
        "version": version,
        "endpoints": {
            "health": "/health",
            "recommendations": [
                "/products/select/:concern_id/:skin_type_id",
                "/products/selectspec/:concern_id/:skin_type_id/:product_type_id"
            ],
            "products": "/products[/create|/update|/delete/:products_id]",
            "reference": ["/brand", "/concerns", "/skin_type", "/product_type", "/key_ingredients"]
        }
    }))
}

/// GET /health - 503 when the store does not answer
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store().ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
