//! Credential store
//!
//! Pool-backed persistence for student accounts. The password hash never
//! leaves this layer except inside a `StudentRecord`.

use anyhow::{Context, Result};
use deadpool_postgres::Pool;
use tokio_postgres::types::Json;

use crate::database::models::{FromRow, Student, StudentRecord, StudentUpdate};

#[derive(Clone)]
pub struct StudentStore {
    pool: Pool,
}

impl StudentStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Fetch the full account record (including the hash) by login handle.
    pub async fn find_by_handle(&self, student_id: &str) -> Result<Option<StudentRecord>> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let row = client
            .query_opt(
                "SELECT id, name, student_id, email, password_hash, blood_group, \
                 emergency_contacts, location, created_at, is_admin \
                 FROM students WHERE student_id = $1",
                &[&student_id],
            )
            .await
            .context("Failed to query student by handle")?;
        row.map(|r| StudentRecord::from_row(&r)).transpose()
    }

    /// Check whether a login handle is already taken.
    pub async fn exists(&self, student_id: &str) -> Result<bool> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let row = client
            .query_opt("SELECT 1 FROM students WHERE student_id = $1", &[&student_id])
            .await
            .context("Failed to check student existence")?;
        Ok(row.is_some())
    }

    /// Conditionally insert a new account.
    ///
    /// Returns `false` when the handle is already taken. The uniqueness check
    /// is the constraint on `student_id`, so two concurrent registrations of
    /// the same handle cannot both land.
    pub async fn insert(&self, record: &StudentRecord) -> Result<bool> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let student = &record.student;
        let inserted = client
            .execute(
                "INSERT INTO students \
                 (id, name, student_id, email, password_hash, blood_group, \
                  emergency_contacts, location, created_at, is_admin) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
                 ON CONFLICT (student_id) DO NOTHING",
                &[
                    &student.id,
                    &student.name,
                    &student.student_id,
                    &student.email,
                    &record.password_hash,
                    &student.blood_group,
                    &Json(&student.emergency_contacts),
                    &student.location,
                    &student.created_at,
                    &student.is_admin,
                ],
            )
            .await
            .context("Failed to insert student")?;
        Ok(inserted == 1)
    }

    /// Apply a partial profile update; absent fields keep their stored
    /// values.
    pub async fn update_fields(&self, student_id: &str, update: &StudentUpdate) -> Result<()> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        client
            .execute(
                "UPDATE students SET \
                 name = COALESCE($2, name), \
                 blood_group = COALESCE($3, blood_group), \
                 emergency_contacts = COALESCE($4, emergency_contacts), \
                 location = COALESCE($5, location) \
                 WHERE student_id = $1",
                &[
                    &student_id,
                    &update.name,
                    &update.blood_group,
                    &update.emergency_contacts.as_ref().map(Json),
                    &update.location,
                ],
            )
            .await
            .context("Failed to update student profile")?;
        Ok(())
    }

    /// List all accounts as public views. The hash is never selected.
    pub async fn list_all(&self) -> Result<Vec<Student>> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let rows = client
            .query(
                "SELECT id, name, student_id, email, blood_group, \
                 emergency_contacts, location, created_at, is_admin \
                 FROM students",
                &[],
            )
            .await
            .context("Failed to list students")?;
        rows.iter().map(Student::from_row).collect()
    }
}
