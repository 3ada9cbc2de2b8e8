//! Health and Metrics Handlers

use axum::{extract::State, http::StatusCode, response::Json};
use prometheus::TextEncoder;
use serde_json::{json, Value};

use crate::AppState;
use pricebook_utils::{ErrorResponse, PricebookError};

use super::error_response;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "pricebook-catalog-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Liveness plus catalog statistics
pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let product_count = state.repository.count().await;
    let levels = state.repository.list_levels().await;

    Json(json!({
        "status": "healthy",
        "service": "pricebook-catalog-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "catalog": {
            "products": product_count,
            "levels": levels.len(),
        }
    }))
}

pub async fn metrics_handler() -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder
        .encode_to_string(&metric_families)
        .map_err(|e| error_response(PricebookError::internal(e.to_string())))
}
