//! # Slot Handlers
//!
//! HTTP entry points for doctor availability and leave slots. Validation and
//! overlap detection live in [`docsched_core::services::SlotService`]; these
//! handlers only extract the request and shape the response.

use axum::{extract::State, http::StatusCode, Json};
use docsched_core::models::slot::{
    AvailabilitySlot, DeleteSlotResponse, PageQuery, SlotPage, SlotRequest,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::error_handling::AppError,
    ApiState,
};

/// Creates a slot unless it overlaps another slot of the same doctor, clinic and date.
///
/// # Endpoint
///
/// ```text
/// POST /api/slots
/// ```
///
/// # Errors
///
/// * `400` - missing or malformed field, or `start_time >= end_time`
/// * `409` - overlaps an existing slot; the body names it in `conflicting_slot`
#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    ApiJson(payload): ApiJson<SlotRequest>,
) -> Result<(StatusCode, Json<AvailabilitySlot>), AppError> {
    let slot = state.slots.create_slot(payload).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// Lists slots newest first.
///
/// ```text
/// GET /api/slots?page=1&limit=5
/// ```
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<SlotPage>, AppError> {
    let page = state.slots.list_slots(query).await?;
    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<AvailabilitySlot>, AppError> {
    let slot = state.slots.get_slot(id).await?;
    Ok(Json(slot))
}

/// Replaces a slot. The slot is never compared against its own stored version.
///
/// ```text
/// PUT /api/slots/:id
/// ```
#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<SlotRequest>,
) -> Result<Json<AvailabilitySlot>, AppError> {
    let slot = state.slots.update_slot(id, payload).await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DeleteSlotResponse>, AppError> {
    state.slots.delete_slot(id).await?;
    Ok(Json(DeleteSlotResponse {
        message: "Slot deleted successfully".to_string(),
    }))
}

/// Every slot of one doctor, ordered by date and start time.
///
/// ```text
/// GET /api/doctors/:doctor_id/slots
/// ```
#[axum::debug_handler]
pub async fn doctor_slots(
    State(state): State<Arc<ApiState>>,
    ApiPath(doctor_id): ApiPath<i32>,
) -> Result<Json<Vec<AvailabilitySlot>>, AppError> {
    let slots = state.slots.doctor_slots(doctor_id).await?;
    Ok(Json(slots))
}
