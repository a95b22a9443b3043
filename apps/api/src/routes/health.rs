use axum::Json;
use chrono::Local;
use serde_json::{json, Value};

/// GET / and GET /health
/// Returns a simple status object with the current local time.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Resume Analyzer API is running",
        "timestamp": Local::now().naive_local(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
