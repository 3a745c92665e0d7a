//! # REST API for Temperature Readings
//!
//! Endpoints for recording and listing readings, deleting mistaken entries,
//! and deriving the trend summary.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use super::error_to_response;
use super::mappers::temperature_mapper::TemperatureMapper;
use crate::domain::commands::temperatures::{
    DeleteTemperatureCommand, GetTrendCommand, RecordTemperatureCommand, TemperatureListQuery,
};
use crate::AppState;
use shared::{
    CreateTemperatureReadingRequest, DeleteTemperatureReadingResponse,
    TemperatureReadingListResponse,
};

#[derive(Debug, Deserialize)]
pub struct ChildQuery {
    pub child_id: String,
}

/// List a child's readings in chronological order
pub async fn list_temperatures(
    State(state): State<AppState>,
    Query(query): Query<ChildQuery>,
) -> impl IntoResponse {
    info!("GET /api/temperatures?child_id={}", query.child_id);

    match state
        .temperature_service
        .list_readings(TemperatureListQuery {
            child_id: query.child_id,
        })
        .await
    {
        Ok(result) => {
            let response = TemperatureReadingListResponse {
                readings: result
                    .readings
                    .into_iter()
                    .map(TemperatureMapper::reading_to_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list temperatures: {}", e);
            error_to_response(e)
        }
    }
}

/// Record a new temperature reading
pub async fn create_temperature(
    State(state): State<AppState>,
    Json(request): Json<CreateTemperatureReadingRequest>,
) -> impl IntoResponse {
    info!("POST /api/temperatures - request: {:?}", request);

    let command = RecordTemperatureCommand {
        child_id: request.child_id,
        temperature: request.temperature,
        temperature_unit: request.temperature_unit,
        timestamp: request.timestamp,
        notes: request.notes,
    };

    match state.temperature_service.record_reading(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(TemperatureMapper::reading_to_dto(result.reading)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to record temperature: {}", e);
            error_to_response(e)
        }
    }
}

/// Delete a reading
pub async fn delete_temperature(
    State(state): State<AppState>,
    Path(reading_id): Path<String>,
    Query(query): Query<ChildQuery>,
) -> impl IntoResponse {
    info!(
        "DELETE /api/temperatures/{}?child_id={}",
        reading_id, query.child_id
    );

    match state
        .temperature_service
        .delete_reading(DeleteTemperatureCommand {
            child_id: query.child_id,
            reading_id,
        })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(DeleteTemperatureReadingResponse {
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete temperature: {}", e);
            error_to_response(e)
        }
    }
}

/// Compute the temperature trend over all of a child's readings
pub async fn get_trend(
    State(state): State<AppState>,
    Query(query): Query<ChildQuery>,
) -> impl IntoResponse {
    info!("GET /api/temperatures/trend?child_id={}", query.child_id);

    match state
        .temperature_service
        .get_trend(GetTrendCommand {
            child_id: query.child_id,
        })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(TemperatureMapper::trend_to_dto(result.trend)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to compute trend: {}", e);
            error_to_response(e)
        }
    }
}
