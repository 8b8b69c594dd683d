// Database Models
//
// tokio-postgres compatible models for student accounts and emergency
// alerts. Emergency contact lists are stored as JSONB.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio_postgres::types::Json;
use tokio_postgres::Row;
use uuid::Uuid;

/// Trait for converting from a tokio-postgres Row
pub trait FromRow {
    fn from_row(row: &Row) -> Result<Self>
    where
        Self: Sized;
}

/// A single emergency contact on a student's profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Public view of a student account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    /// Login handle, unique across all accounts
    pub student_id: String,
    pub email: String,
    pub blood_group: String,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_admin: bool,
}

impl FromRow for Student {
    fn from_row(row: &Row) -> Result<Self> {
        let contacts: Json<Vec<EmergencyContact>> = row.try_get("emergency_contacts")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            student_id: row.try_get("student_id")?,
            email: row.try_get("email")?,
            blood_group: row.try_get("blood_group")?,
            emergency_contacts: contacts.0,
            location: row.try_get("location")?,
            created_at: row.try_get("created_at")?,
            is_admin: row.try_get("is_admin")?,
        })
    }
}

/// Internal account record: the public view plus the credential hash.
///
/// Deliberately not serializable, so the hash cannot leak into a response.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub student: Student,
    pub password_hash: String,
}

impl FromRow for StudentRecord {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            student: Student::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}

/// Partial profile update; absent fields keep their stored values
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contacts: Option<Vec<EmergencyContact>>,
    pub location: Option<String>,
}

/// Alert lifecycle state. The only exposed transition is
/// `Active -> Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(AlertStatus::Active),
            "resolved" => Ok(AlertStatus::Resolved),
            other => Err(anyhow::anyhow!("Unknown alert status: {other}")),
        }
    }
}

/// Emergency alert. The student fields are snapshotted at creation time and
/// frozen thereafter; only status/resolved_at/resolved_by change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    pub blood_group: String,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
    pub location: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
}

impl FromRow for Alert {
    fn from_row(row: &Row) -> Result<Self> {
        let contacts: Json<Vec<EmergencyContact>> = row.try_get("emergency_contacts")?;
        let status: String = row.try_get("status")?;
        Ok(Self {
            id: row.try_get("id")?,
            student_id: row.try_get("student_id")?,
            student_name: row.try_get("student_name")?,
            student_email: row.try_get("student_email")?,
            blood_group: row.try_get("blood_group")?,
            emergency_contacts: contacts.0,
            location: row.try_get("location")?,
            timestamp: row.try_get("created_at")?,
            status: status.parse()?,
            message: row.try_get("message")?,
            resolved_at: row.try_get("resolved_at")?,
            resolved_by: row.try_get("resolved_by")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_status_parse_and_display() {
        assert_eq!("active".parse::<AlertStatus>().unwrap(), AlertStatus::Active);
        assert_eq!(
            "resolved".parse::<AlertStatus>().unwrap(),
            AlertStatus::Resolved
        );
        assert!("escalated".parse::<AlertStatus>().is_err());
        assert_eq!(AlertStatus::Resolved.to_string(), "resolved");
    }

    #[test]
    fn test_alert_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&AlertStatus::Active).unwrap(),
            "\"active\""
        );
        let status: AlertStatus = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(status, AlertStatus::Resolved);
    }

    #[test]
    fn test_student_serde_roundtrip_without_hash() {
        let student = Student {
            id: Uuid::new_v4(),
            name: "Test Student".to_string(),
            student_id: "s1".to_string(),
            email: "s1@test.com".to_string(),
            blood_group: "A+".to_string(),
            emergency_contacts: vec![EmergencyContact {
                name: "Parent".to_string(),
                relationship: "Parent".to_string(),
                phone: "+1234567890".to_string(),
                email: None,
            }],
            location: Some("Test Campus".to_string()),
            created_at: Utc::now(),
            is_admin: false,
        };

        let json = serde_json::to_value(&student).unwrap();
        assert!(json.get("password_hash").is_none());

        let back: Student = serde_json::from_value(json).unwrap();
        assert_eq!(back.student_id, "s1");
        assert_eq!(back.emergency_contacts.len(), 1);
    }

    #[test]
    fn test_contact_email_omitted_when_absent() {
        let contact = EmergencyContact {
            name: "Parent".to_string(),
            relationship: "Parent".to_string(),
            phone: "+1234567890".to_string(),
            email: None,
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_unresolved_alert_omits_resolution_fields() {
        let alert = Alert {
            id: Uuid::new_v4(),
            student_id: "s1".to_string(),
            student_name: "Test Student".to_string(),
            student_email: "s1@test.com".to_string(),
            blood_group: "A+".to_string(),
            emergency_contacts: vec![],
            location: None,
            timestamp: Utc::now(),
            status: AlertStatus::Active,
            message: Some("help".to_string()),
            resolved_at: None,
            resolved_by: None,
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert!(json.get("resolved_at").is_none());
        assert!(json.get("resolved_by").is_none());
        assert_eq!(json["status"], "active");
    }
}
