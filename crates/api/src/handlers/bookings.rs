use axum::{extract::State, http::StatusCode, Json};
use docsched_core::models::booking::{
    Booking, BookingAverageResponse, BookingSumResponse, CreateBookingRequest,
};
use std::sync::Arc;

use crate::{extract::ApiJson, middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.bookings.record(payload).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[axum::debug_handler]
pub async fn sum_bookings(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<BookingSumResponse>, AppError> {
    let total_bookings = state.bookings.total().await?;
    Ok(Json(BookingSumResponse { total_bookings }))
}

#[axum::debug_handler]
pub async fn average_bookings(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<BookingAverageResponse>, AppError> {
    let average_bookings = state.bookings.average().await?;
    Ok(Json(BookingAverageResponse { average_bookings }))
}
