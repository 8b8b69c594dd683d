//! Student profile routes
//!
//! Self profile read/update for any authenticated student, plus the
//! admin-only roster listing.

use axum::extract::{Query, State};
use axum::{Extension, Json};

use crate::auth::{authorize, Role};
use crate::database::models::{Student, StudentUpdate};
use crate::error::ApiError;
use crate::i18n::get_translation;
use crate::routes::{ApiResponse, LangQuery};
use crate::server::AppState;

/// GET /api/students/me
pub async fn me(Extension(student): Extension<Student>) -> Json<Student> {
    Json(student)
}

/// PUT /api/students/me
///
/// Applies only the fields present in the payload. Alerts created earlier
/// keep their snapshot; this touches the account record only.
pub async fn update_me(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    Extension(student): Extension<Student>,
    Json(update): Json<StudentUpdate>,
) -> Result<Json<ApiResponse>, ApiError> {
    state
        .students
        .update_fields(&student.student_id, &update)
        .await?;

    Ok(Json(ApiResponse {
        message: get_translation("profile_updated", &query.lang),
        data: None,
        lang: query.lang,
    }))
}

/// GET /api/students (admin only)
pub async fn list_students(
    State(state): State<AppState>,
    Extension(student): Extension<Student>,
) -> Result<Json<Vec<Student>>, ApiError> {
    authorize(&student, Role::Admin)?;

    let students = state.students.list_all().await?;
    Ok(Json(students))
}
