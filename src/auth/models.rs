//! Authentication Models
//!
//! Data structures for authentication requests and responses.

use serde::{Deserialize, Serialize};

use crate::database::models::Student;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
}

/// Token response after successful authentication
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: Student,
}

impl TokenResponse {
    pub fn new(access_token: String, user: Student) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user,
        }
    }
}
