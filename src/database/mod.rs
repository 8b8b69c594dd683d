//! # Database Module
//!
//! PostgreSQL integration using tokio-postgres with deadpool pooling.
//! Includes connection management, models, and the student/alert stores.

pub mod alerts;
pub mod connection;
pub mod models;
pub mod students;

pub use connection::{DatabaseConfig, DatabaseConnection};
