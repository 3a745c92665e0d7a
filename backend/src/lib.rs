//! # Fever Tracker Backend
//!
//! Contains all non-UI logic for the fever tracker application.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, validation, trend + dose-safety computation)
//!     ↓
//! Storage Layer (per-child CSV/YAML files)
//! ```
//!
//! The domain layer is UI-agnostic: a different transport (CLI, desktop
//! shell) could sit on top of the same services without modification.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, patch, post, put},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use domain::{
    ChildService, MedicationLogService, MedicationService, ReminderService, TemperatureService,
};
use io::rest::{
    child_apis, medication_apis, medication_log_apis, reminder_apis, temperature_apis,
};
use storage::csv::CsvConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub child_service: ChildService,
    pub temperature_service: TemperatureService,
    pub medication_service: MedicationService,
    pub medication_log_service: MedicationLogService,
    pub reminder_service: ReminderService,
}

impl AppState {
    /// Build the application state on top of an existing storage connection
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            child_service: ChildService::new(connection.clone()),
            temperature_service: TemperatureService::new(connection.clone()),
            medication_service: MedicationService::new(connection.clone()),
            medication_log_service: MedicationLogService::new(connection.clone()),
            reminder_service: ReminderService::new(connection),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up storage");
    let connection = Arc::new(CsvConnection::new_default()?);

    info!("Setting up domain services");
    Ok(AppState::new(connection))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/children",
            get(child_apis::list_children).post(child_apis::create_child),
        )
        .route(
            "/children/:child_id",
            get(child_apis::get_child).delete(child_apis::delete_child),
        )
        .route(
            "/temperatures",
            get(temperature_apis::list_temperatures).post(temperature_apis::create_temperature),
        )
        .route("/temperatures/trend", get(temperature_apis::get_trend))
        .route(
            "/temperatures/:reading_id",
            delete(temperature_apis::delete_temperature),
        )
        .route(
            "/medications",
            get(medication_apis::list_medications).post(medication_apis::create_medication),
        )
        .route(
            "/medications/:medication_id/deactivate",
            put(medication_apis::deactivate_medication),
        )
        .route(
            "/medications/:medication_id/dose-safety",
            get(medication_apis::dose_safety),
        )
        .route(
            "/medication-logs",
            get(medication_log_apis::list_medication_logs)
                .post(medication_log_apis::create_medication_log),
        )
        .route(
            "/medication-logs/:log_id",
            delete(medication_log_apis::delete_medication_log),
        )
        .route("/reminders", get(reminder_apis::list_reminders))
        .route(
            "/reminders/generate",
            post(reminder_apis::generate_reminders),
        )
        .route(
            "/reminders/:reminder_id",
            patch(reminder_apis::update_reminder),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
