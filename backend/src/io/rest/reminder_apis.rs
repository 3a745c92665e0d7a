//! # REST API for Medication Reminders
//!
//! Endpoints for generating a definition's reminder schedule, listing
//! reminders, and ticking them off.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use super::error_to_response;
use super::mappers::reminder_mapper::ReminderMapper;
use crate::domain::commands::reminders::{
    GenerateRemindersCommand, ReminderListQuery, UpdateReminderCommand,
};
use crate::AppState;
use shared::{
    GenerateRemindersRequest, GenerateRemindersResponse, ReminderListResponse,
    UpdateReminderRequest,
};

#[derive(Debug, Deserialize)]
pub struct RemindersQuery {
    pub child_id: String,
    /// When true, only not-yet-completed reminders are returned
    pub pending: Option<bool>,
}

/// List a child's reminders, soonest first
pub async fn list_reminders(
    State(state): State<AppState>,
    Query(query): Query<RemindersQuery>,
) -> impl IntoResponse {
    info!(
        "GET /api/reminders?child_id={}&pending={:?}",
        query.child_id, query.pending
    );

    match state
        .reminder_service
        .list_reminders(ReminderListQuery {
            child_id: query.child_id,
            pending_only: query.pending.unwrap_or(false),
        })
        .await
    {
        Ok(result) => {
            let response = ReminderListResponse {
                reminders: result
                    .reminders
                    .into_iter()
                    .map(ReminderMapper::to_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list reminders: {}", e);
            error_to_response(e)
        }
    }
}

/// Generate the reminder schedule for a medication definition
pub async fn generate_reminders(
    State(state): State<AppState>,
    Json(request): Json<GenerateRemindersRequest>,
) -> impl IntoResponse {
    info!("POST /api/reminders/generate - request: {:?}", request);

    match state
        .reminder_service
        .generate_reminders(GenerateRemindersCommand {
            child_id: request.child_id,
            medication_definition_id: request.medication_definition_id,
        })
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(GenerateRemindersResponse {
                count: result.count,
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to generate reminders: {}", e);
            error_to_response(e)
        }
    }
}

/// Mark a reminder completed or pending again
pub async fn update_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<String>,
    Json(request): Json<UpdateReminderRequest>,
) -> impl IntoResponse {
    info!(
        "PATCH /api/reminders/{} - is_completed={}",
        reminder_id, request.is_completed
    );

    match state
        .reminder_service
        .update_reminder(UpdateReminderCommand {
            child_id: request.child_id,
            reminder_id,
            is_completed: request.is_completed,
        })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ReminderMapper::to_dto(result.reminder)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update reminder: {}", e);
            error_to_response(e)
        }
    }
}
