//! # REST API for Medication Definitions
//!
//! Endpoints for creating and listing regimens, deactivating them, and
//! classifying today's overdose risk.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use super::error_to_response;
use super::mappers::medication_mapper::MedicationMapper;
use crate::domain::commands::medication_logs::CheckDoseSafetyCommand;
use crate::domain::commands::medications::{
    CreateMedicationCommand, DeactivateMedicationCommand, MedicationListQuery,
};
use crate::AppState;
use shared::{CreateMedicationRequest, DoseSafetyResponse, MedicationListResponse};

#[derive(Debug, Deserialize)]
pub struct MedicationsQuery {
    pub child_id: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ChildQuery {
    pub child_id: String,
}

/// List a child's medication definitions
pub async fn list_medications(
    State(state): State<AppState>,
    Query(query): Query<MedicationsQuery>,
) -> impl IntoResponse {
    info!(
        "GET /api/medications?child_id={}&is_active={:?}",
        query.child_id, query.is_active
    );

    match state
        .medication_service
        .list_medications(MedicationListQuery {
            child_id: query.child_id,
            is_active: query.is_active,
        })
        .await
    {
        Ok(result) => {
            let response = MedicationListResponse {
                medications: result
                    .medications
                    .into_iter()
                    .map(MedicationMapper::definition_to_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list medications: {}", e);
            error_to_response(e)
        }
    }
}

/// Create a new medication definition
pub async fn create_medication(
    State(state): State<AppState>,
    Json(request): Json<CreateMedicationRequest>,
) -> impl IntoResponse {
    info!("POST /api/medications - request: {:?}", request);

    let command = CreateMedicationCommand {
        child_id: request.child_id,
        name: request.name,
        dosage: request.dosage,
        dosage_unit: request.dosage_unit,
        frequency: request.frequency,
        max_doses_per_day: request.max_doses_per_day,
        max_total_daily_dosage: request.max_total_daily_dosage,
        start_date: request.start_date,
        end_date: request.end_date,
    };

    match state.medication_service.create_medication(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(MedicationMapper::definition_to_dto(result.medication)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create medication: {}", e);
            error_to_response(e)
        }
    }
}

/// Deactivate a medication definition
pub async fn deactivate_medication(
    State(state): State<AppState>,
    Path(medication_id): Path<String>,
    Query(query): Query<ChildQuery>,
) -> impl IntoResponse {
    info!(
        "PUT /api/medications/{}/deactivate?child_id={}",
        medication_id, query.child_id
    );

    match state
        .medication_service
        .deactivate_medication(DeactivateMedicationCommand {
            child_id: query.child_id,
            medication_id,
        })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(MedicationMapper::definition_to_dto(result.medication)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to deactivate medication: {}", e);
            error_to_response(e)
        }
    }
}

/// Classify today's overdose risk for one medication.
/// The UI blocks a new dose on `dangerous` and asks for confirmation on
/// `warning`.
pub async fn dose_safety(
    State(state): State<AppState>,
    Path(medication_id): Path<String>,
    Query(query): Query<ChildQuery>,
) -> impl IntoResponse {
    info!(
        "GET /api/medications/{}/dose-safety?child_id={}",
        medication_id, query.child_id
    );

    match state
        .medication_log_service
        .check_dose_safety(CheckDoseSafetyCommand {
            child_id: query.child_id,
            medication_definition_id: medication_id,
        })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(DoseSafetyResponse {
                medication_definition_id: result.medication_definition_id,
                doses_given_today: result.doses_given_today,
                max_doses_per_day: result.max_doses_per_day,
                risk: result.risk,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to check dose safety: {}", e);
            error_to_response(e)
        }
    }
}
