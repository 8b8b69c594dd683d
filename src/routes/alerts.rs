//! Emergency alert routes
//!
//! Alert creation snapshots the caller's profile; listing scope depends on
//! role; status updates are admin-only.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{authorize, Role};
use crate::database::models::{Alert, AlertStatus, Student};
use crate::error::ApiError;
use crate::i18n::get_translation;
use crate::routes::{ApiResponse, LangQuery};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AlertCreateRequest {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlertListQuery {
    pub status_filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlertUpdateRequest {
    pub status: AlertStatus,
    pub resolved_by: Option<String>,
}

/// POST /api/alerts
///
/// The caller's current profile fields are copied into the alert and frozen
/// there; later profile edits do not change existing alerts.
pub async fn create_alert(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    Extension(student): Extension<Student>,
    Json(payload): Json<AlertCreateRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let alert = Alert {
        id: Uuid::new_v4(),
        student_id: student.student_id,
        student_name: student.name,
        student_email: student.email,
        blood_group: student.blood_group,
        emergency_contacts: student.emergency_contacts,
        location: student.location,
        timestamp: Utc::now(),
        status: AlertStatus::Active,
        message: payload.message,
        resolved_at: None,
        resolved_by: None,
    };

    state.alerts.insert(&alert).await?;

    tracing::info!("Emergency alert {} created by {}", alert.id, alert.student_id);

    Ok(Json(ApiResponse {
        message: get_translation("alert_created", &query.lang),
        data: Some(json!({ "alert_id": alert.id })),
        lang: query.lang,
    }))
}

/// GET /api/alerts?status_filter=
///
/// Non-admins see only their own alerts; the status filter composes with
/// that restriction.
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertListQuery>,
    Extension(student): Extension<Student>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let status = effective_status_filter(query.status_filter);
    let owner = if student.is_admin {
        None
    } else {
        Some(student.student_id)
    };

    let alerts = state.alerts.find(status.as_deref(), owner.as_deref()).await?;
    Ok(Json(alerts))
}

/// GET /api/alerts/active (admin only)
pub async fn active_alerts(
    State(state): State<AppState>,
    Extension(student): Extension<Student>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    authorize(&student, Role::Admin)?;

    let alerts = state
        .alerts
        .find(Some(AlertStatus::Active.as_str()), None)
        .await?;
    Ok(Json(alerts))
}

/// PUT /api/alerts/{alert_id} (admin only)
///
/// On the transition to `resolved`, stamps the resolution time and the
/// resolving admin's handle.
pub async fn update_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
    Query(query): Query<LangQuery>,
    Extension(student): Extension<Student>,
    Json(payload): Json<AlertUpdateRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    authorize(&student, Role::Admin)?;

    // A malformed ID cannot match any alert
    let id = Uuid::parse_str(&alert_id).map_err(|_| ApiError::NotFound("Alert not found"))?;

    let (resolved_by, resolved_at) = match payload.status {
        AlertStatus::Resolved => (Some(student.student_id), Some(Utc::now())),
        AlertStatus::Active => (payload.resolved_by, None),
    };

    let matched = state
        .alerts
        .update_status(id, payload.status, resolved_by.as_deref(), resolved_at)
        .await?;

    if !matched {
        return Err(ApiError::NotFound("Alert not found"));
    }

    Ok(Json(ApiResponse {
        message: "Alert updated successfully".to_string(),
        data: None,
        lang: query.lang,
    }))
}

/// Absent parameter defaults to `active`; an explicitly empty value means no
/// status filter.
fn effective_status_filter(param: Option<String>) -> Option<String> {
    match param {
        None => Some(AlertStatus::Active.as_str().to_string()),
        Some(s) if s.is_empty() => None,
        Some(s) => Some(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_defaults_to_active() {
        assert_eq!(effective_status_filter(None), Some("active".to_string()));
    }

    #[test]
    fn test_empty_status_filter_means_unfiltered() {
        assert_eq!(effective_status_filter(Some(String::new())), None);
    }

    #[test]
    fn test_explicit_status_filter_passes_through() {
        assert_eq!(
            effective_status_filter(Some("resolved".to_string())),
            Some("resolved".to_string())
        );
    }
}
