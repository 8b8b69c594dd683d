//! # Server Module
//!
//! HTTP server setup, route configuration, and startup seeding for the
//! SafeTrack server.

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::{middleware, Router};
use chrono::Utc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{self, CorsLayer};
use uuid::Uuid;

use crate::auth::jwt::JwtService;
use crate::auth::middleware::AuthMiddleware;
use crate::auth::password;
use crate::config::Config;
use crate::database::alerts::AlertStore;
use crate::database::models::{Student, StudentRecord};
use crate::database::students::StudentStore;
use crate::database::DatabaseConnection;
use crate::routes;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: Arc<JwtService>,
    pub students: StudentStore,
    pub alerts: AlertStore,
}

/// Starts the SafeTrack HTTP server.
///
/// Loads configuration, connects to the database, runs migrations, seeds the
/// admin account, and serves the application until the process terminates.
pub async fn start() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration from environment")?;

    let jwt_service = Arc::new(JwtService::new(&config.secret_key));

    let db = DatabaseConnection::from_url(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await?;

    let students = StudentStore::new(db.pool().clone());
    let alerts = AlertStore::new(db.pool().clone());

    seed_admin(&students).await?;

    let app_state = AppState {
        jwt_service,
        students,
        alerts,
    };

    // Everything past the gate resolves the bearer token to a live account
    let protected_routes = Router::new()
        .route(
            "/api/students/me",
            get(routes::students::me).put(routes::students::update_me),
        )
        .route("/api/students", get(routes::students::list_students))
        .route(
            "/api/alerts",
            post(routes::alerts::create_alert).get(routes::alerts::list_alerts),
        )
        .route("/api/alerts/active", get(routes::alerts::active_alerts))
        .route("/api/alerts/{alert_id}", put(routes::alerts::update_alert))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            AuthMiddleware::authenticate,
        ));

    let app = Router::new()
        .route("/api/status", get(routes::health::get_api_status))
        .merge(protected_routes)
        .merge(routes::auth::create_auth_routes())
        .layer(ServiceBuilder::new().layer(build_cors(&config.cors_origins)))
        .with_state(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("🚀 SafeTrack Server starting...");
    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 API status available at http://{}/api/status", addr);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")
}

/// Build the CORS layer from the configured origins.
///
/// A `*` entry allows any origin (without credentials, which CORS forbids
/// for wildcards); an explicit list allows credentials.
fn build_cors(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ]);

    if origins.iter().any(|origin| origin == "*") {
        base.allow_origin(cors::Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        base.allow_origin(parsed).allow_credentials(true)
    }
}

/// Create the admin account on first boot.
async fn seed_admin(students: &StudentStore) -> Result<()> {
    if students.exists("admin").await? {
        return Ok(());
    }

    let record = StudentRecord {
        student: Student {
            id: Uuid::new_v4(),
            name: "System Administrator".to_string(),
            student_id: "admin".to_string(),
            email: "admin@safetrack.com".to_string(),
            blood_group: "Unknown".to_string(),
            emergency_contacts: vec![],
            location: Some("Admin Office".to_string()),
            created_at: Utc::now(),
            is_admin: true,
        },
        password_hash: password::hash_password("admin123")?,
    };

    if students.insert(&record).await? {
        tracing::info!("Admin user created with ID: admin");
    }

    Ok(())
}
