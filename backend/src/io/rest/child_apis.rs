//! # REST API for Child Management
//!
//! Endpoints for registering, retrieving, and deleting children.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use super::error_to_response;
use super::mappers::child_mapper::ChildMapper;
use crate::domain::commands::children::{CreateChildCommand, DeleteChildCommand, GetChildCommand};
use crate::AppState;
use shared::{ChildListResponse, CreateChildRequest, DeleteChildResponse};

/// Register a new child
pub async fn create_child(
    State(state): State<AppState>,
    Json(request): Json<CreateChildRequest>,
) -> impl IntoResponse {
    info!("POST /api/children - request: {:?}", request);

    let command = CreateChildCommand {
        name: request.name,
        date_of_birth: request.date_of_birth,
        weight_kg: request.weight_kg,
    };

    match state.child_service.create_child(command).await {
        Ok(result) => (StatusCode::CREATED, Json(ChildMapper::to_dto(result.child))).into_response(),
        Err(e) => {
            error!("Failed to create child: {}", e);
            error_to_response(e)
        }
    }
}

/// Get a child by ID
pub async fn get_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}", child_id);

    match state.child_service.get_child(GetChildCommand { child_id }).await {
        Ok(result) => match result.child {
            Some(child) => (StatusCode::OK, Json(ChildMapper::to_dto(child))).into_response(),
            None => (StatusCode::NOT_FOUND, "Child not found").into_response(),
        },
        Err(e) => {
            error!("Failed to get child: {}", e);
            error_to_response(e)
        }
    }
}

/// List all children
pub async fn list_children(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/children");

    match state.child_service.list_children().await {
        Ok(result) => {
            let response = ChildListResponse {
                children: result.children.into_iter().map(ChildMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list children: {}", e);
            error_to_response(e)
        }
    }
}

/// Delete a child and all of its records
pub async fn delete_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/children/{}", child_id);

    match state
        .child_service
        .delete_child(DeleteChildCommand { child_id })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(DeleteChildResponse {
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete child: {}", e);
            error_to_response(e)
        }
    }
}
