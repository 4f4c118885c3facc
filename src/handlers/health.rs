// src/handlers/health.rs

use axum::Json;
use serde_json::{json, Value};

// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Sales Assistant API is running" }))
}

// GET /test
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "Backend is running" }))
}
