//! Alert store
//!
//! Pool-backed persistence for emergency alerts. Listings are always newest
//! first.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use tokio_postgres::types::Json;
use uuid::Uuid;

use crate::database::models::{Alert, AlertStatus, FromRow};

#[derive(Clone)]
pub struct AlertStore {
    pool: Pool,
}

impl AlertStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, alert: &Alert) -> Result<()> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        client
            .execute(
                "INSERT INTO alerts \
                 (id, student_id, student_name, student_email, blood_group, \
                  emergency_contacts, location, created_at, status, message) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
                &[
                    &alert.id,
                    &alert.student_id,
                    &alert.student_name,
                    &alert.student_email,
                    &alert.blood_group,
                    &Json(&alert.emergency_contacts),
                    &alert.location,
                    &alert.timestamp,
                    &alert.status.as_str(),
                    &alert.message,
                ],
            )
            .await
            .context("Failed to insert alert")?;
        Ok(())
    }

    /// Fetch alerts, optionally filtered by status and/or owning handle,
    /// newest first.
    pub async fn find(&self, status: Option<&str>, owner: Option<&str>) -> Result<Vec<Alert>> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let rows = client
            .query(
                "SELECT id, student_id, student_name, student_email, blood_group, \
                 emergency_contacts, location, created_at, status, message, \
                 resolved_at, resolved_by \
                 FROM alerts \
                 WHERE ($1::text IS NULL OR status = $1) \
                   AND ($2::text IS NULL OR student_id = $2) \
                 ORDER BY created_at DESC",
                &[&status, &owner],
            )
            .await
            .context("Failed to query alerts")?;
        rows.iter().map(Alert::from_row).collect()
    }

    /// Set an alert's status.
    ///
    /// `resolved_by` is written as given; `resolved_at`, when provided,
    /// replaces the stored value. Returns whether any alert matched the ID.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: AlertStatus,
        resolved_by: Option<&str>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let matched = client
            .execute(
                "UPDATE alerts SET \
                 status = $2, \
                 resolved_by = $3, \
                 resolved_at = COALESCE($4, resolved_at) \
                 WHERE id = $1",
                &[&id, &status.as_str(), &resolved_by, &resolved_at],
            )
            .await
            .context("Failed to update alert status")?;
        Ok(matched > 0)
    }
}
