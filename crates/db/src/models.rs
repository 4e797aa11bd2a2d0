use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use docsched_core::models::{booking::Booking, slot::AvailabilitySlot};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilitySlot {
    pub id: Uuid,
    pub clinic_id: i32,
    pub doctor_id: i32,
    pub kind: Option<String>,
    pub day_of_week: String,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbAvailabilitySlot> for AvailabilitySlot {
    fn from(row: DbAvailabilitySlot) -> Self {
        AvailabilitySlot {
            id: row.id,
            clinic_id: row.clinic_id,
            doctor_id: row.doctor_id,
            kind: row.kind,
            day_of_week: row.day_of_week,
            date: row.slot_date,
            start_time: row.start_time,
            end_time: row.end_time,
            description: row.description,
            is_available: row.is_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub no_of_bookings: i64,
    pub created_at: DateTime<Utc>,
}

impl From<DbBooking> for Booking {
    fn from(row: DbBooking) -> Self {
        Booking {
            id: row.id,
            no_of_bookings: row.no_of_bookings,
            created_at: row.created_at,
        }
    }
}
