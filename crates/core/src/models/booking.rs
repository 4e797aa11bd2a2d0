use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub no_of_bookings: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub bookings: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSumResponse {
    pub total_bookings: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingAverageResponse {
    pub average_bookings: f64,
}
