use axum::response::Json;
use chrono::Utc;
use serde_json::json;

/// API status endpoint handler.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/api/status`
///
/// Returns a small health payload for load balancers and uptime monitors:
/// ```json
/// {
///   "message": "SafeTrack API is running",
///   "status": "healthy",
///   "timestamp": "..."
/// }
/// ```
pub async fn get_api_status() -> Json<serde_json::Value> {
    Json(json!({
        "message": "SafeTrack API is running",
        "status": "healthy",
        "timestamp": Utc::now(),
    }))
}
