// # Routes Module
//
// HTTP route handlers for the SafeTrack server, organized by functionality.
//
// ## Available Route Modules
// - `health`: API status endpoint
// - `auth`: Registration and login endpoints
// - `students`: Profile and admin roster endpoints
// - `alerts`: Emergency alert endpoints
//
// Register new route modules in `server.rs` using the Router.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// API status endpoint
pub mod health;

/// Registration and login endpoints
pub mod auth;

/// Student profile endpoints
pub mod students;

/// Emergency alert endpoints
pub mod alerts;

/// Localized response envelope for mutating operations
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub lang: String,
}

/// `?lang=` query parameter, defaulting to English
#[derive(Debug, Deserialize)]
pub struct LangQuery {
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}
