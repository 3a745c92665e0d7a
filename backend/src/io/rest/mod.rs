//! # REST API Interface Layer
//!
//! Provides the HTTP endpoints for the fever tracker. This layer handles:
//! - Request/response serialization
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! It is a pure translation layer: validation and business rules live in the
//! domain services.

pub mod child_apis;
pub mod mappers;
pub mod medication_apis;
pub mod medication_log_apis;
pub mod reminder_apis;
pub mod temperature_apis;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use log::error;
use shared::ErrorResponse;

use crate::domain::dose_safety::InvalidConfiguration;
use crate::domain::validation::ValidationError;

/// Translate a domain error into an HTTP response.
///
/// Validation failures carry the offending field and map to 400; an
/// `InvalidConfiguration` is a data-integrity bug and maps to 500 without
/// leaking internals; missing entities map to 404.
pub(crate) fn error_to_response(error: anyhow::Error) -> Response {
    if let Some(validation) = error.downcast_ref::<ValidationError>() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: validation.to_string(),
                field: Some(validation.field().to_string()),
            }),
        )
            .into_response();
    }

    if error.downcast_ref::<InvalidConfiguration>().is_some() {
        error!("Invalid configuration reached the dose evaluator: {}", error);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal configuration error".to_string(),
                field: None,
            }),
        )
            .into_response();
    }

    let message = error.to_string();
    let status = if message.contains("not found") {
        StatusCode::NOT_FOUND
    } else if message.contains("already exists") {
        StatusCode::BAD_REQUEST
    } else {
        error!("Request failed: {:#}", error);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: message,
            field: None,
        }),
    )
        .into_response()
}
