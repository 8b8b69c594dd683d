//! Auth routes for registration and login

use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::models::{LoginRequest, TokenResponse};
use crate::auth::password;
use crate::database::models::{EmergencyContact, Student, StudentRecord};
use crate::error::ApiError;
use crate::i18n::get_translation;
use crate::routes::{ApiResponse, LangQuery};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub password: String,
    pub blood_group: String,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
    pub location: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let lang = query.lang;

    if state.students.exists(&payload.student_id).await? {
        return Err(ApiError::Conflict(get_translation("user_exists", &lang)));
    }

    let password_hash = password::hash_password(&payload.password)?;
    let record = StudentRecord {
        student: Student {
            id: Uuid::new_v4(),
            name: payload.name,
            student_id: payload.student_id,
            email: payload.email,
            blood_group: payload.blood_group,
            emergency_contacts: payload.emergency_contacts,
            location: payload.location,
            created_at: Utc::now(),
            is_admin: false,
        },
        password_hash,
    };

    // The store's conditional insert closes the window between the existence
    // check above and this write: the racer that loses the unique handle
    // still gets a Conflict.
    if !state.students.insert(&record).await? {
        return Err(ApiError::Conflict(get_translation("user_exists", &lang)));
    }

    tracing::info!("Registered student {}", record.student.student_id);

    Ok(Json(ApiResponse {
        message: get_translation("user_registered", &lang),
        data: Some(json!({ "student_id": record.student.student_id })),
        lang,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let lang = query.lang;

    // An unknown handle and a wrong password are indistinguishable to the
    // caller.
    let record = match state.students.find_by_handle(&payload.student_id).await? {
        Some(record) if password::verify_password(&payload.password, &record.password_hash) => {
            record
        }
        _ => {
            return Err(ApiError::Unauthorized(get_translation(
                "invalid_credentials",
                &lang,
            )));
        }
    };

    let access_token = state.jwt_service.create_token(&record.student.student_id)?;

    Ok(Json(TokenResponse::new(access_token, record.student)))
}

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}
