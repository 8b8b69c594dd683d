//! # Authentication Module
//!
//! Handles JWT token issuance and validation, password hashing, and the
//! access-control gate that protects API endpoints.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

use crate::database::models::Student;
use crate::error::ApiError;

/// Role required by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
}

/// Single authorization predicate for role checks.
///
/// Every authenticated route already has a resolved account; admin-only
/// handlers call this instead of testing the flag themselves.
pub fn authorize(account: &Student, required: Role) -> Result<(), ApiError> {
    match required {
        Role::Student => Ok(()),
        Role::Admin if account.is_admin => Ok(()),
        Role::Admin => Err(ApiError::Forbidden("Admin access required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Student;
    use chrono::Utc;
    use uuid::Uuid;

    fn student(is_admin: bool) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: "Test Student".to_string(),
            student_id: "s1".to_string(),
            email: "s1@test.com".to_string(),
            blood_group: "A+".to_string(),
            emergency_contacts: vec![],
            location: None,
            created_at: Utc::now(),
            is_admin,
        }
    }

    #[test]
    fn test_student_role_always_allowed() {
        assert!(authorize(&student(false), Role::Student).is_ok());
        assert!(authorize(&student(true), Role::Student).is_ok());
    }

    #[test]
    fn test_admin_role_requires_flag() {
        assert!(authorize(&student(true), Role::Admin).is_ok());
        let err = authorize(&student(false), Role::Admin).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
