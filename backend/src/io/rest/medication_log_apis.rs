//! # REST API for Dose Logs
//!
//! Endpoints for recording administered doses, listing them with filters,
//! and deleting mistaken entries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use super::error_to_response;
use super::mappers::medication_mapper::MedicationMapper;
use crate::domain::commands::medication_logs::{
    DeleteMedicationLogCommand, MedicationLogListQuery, RecordDoseCommand,
};
use crate::AppState;
use shared::{
    CreateMedicationLogRequest, DeleteMedicationLogResponse, MedicationLogListResponse,
};

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub child_id: String,
    pub medication_definition_id: Option<String>,
    /// Restrict to one calendar date (YYYY-MM-DD)
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChildQuery {
    pub child_id: String,
}

/// List dose logs, most recent first
pub async fn list_medication_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> impl IntoResponse {
    info!(
        "GET /api/medication-logs?child_id={}&medication_definition_id={:?}&date={:?}",
        query.child_id, query.medication_definition_id, query.date
    );

    match state
        .medication_log_service
        .list_logs(MedicationLogListQuery {
            child_id: query.child_id,
            medication_definition_id: query.medication_definition_id,
            date: query.date,
        })
        .await
    {
        Ok(result) => {
            let response = MedicationLogListResponse {
                logs: result
                    .logs
                    .into_iter()
                    .map(MedicationMapper::log_to_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list medication logs: {}", e);
            error_to_response(e)
        }
    }
}

/// Record an administered dose
pub async fn create_medication_log(
    State(state): State<AppState>,
    Json(request): Json<CreateMedicationLogRequest>,
) -> impl IntoResponse {
    info!("POST /api/medication-logs - request: {:?}", request);

    let command = RecordDoseCommand {
        medication_definition_id: request.medication_definition_id,
        child_id: request.child_id,
        administered_at: request.administered_at,
        dosage_administered: request.dosage_administered,
        dosage_unit: request.dosage_unit,
        administered_by: request.administered_by,
    };

    match state.medication_log_service.record_dose(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(MedicationMapper::log_to_dto(result.log)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to record dose: {}", e);
            error_to_response(e)
        }
    }
}

/// Delete a dose log
pub async fn delete_medication_log(
    State(state): State<AppState>,
    Path(log_id): Path<String>,
    Query(query): Query<ChildQuery>,
) -> impl IntoResponse {
    info!(
        "DELETE /api/medication-logs/{}?child_id={}",
        log_id, query.child_id
    );

    match state
        .medication_log_service
        .delete_log(DeleteMedicationLogCommand {
            child_id: query.child_id,
            log_id,
        })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(DeleteMedicationLogResponse {
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete medication log: {}", e);
            error_to_response(e)
        }
    }
}
