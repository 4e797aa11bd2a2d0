use std::sync::Arc;

use tracing::info;

use crate::{
    errors::{ScheduleError, ScheduleResult},
    models::booking::{Booking, CreateBookingRequest},
    store::BookingStore,
};

/// Records booking counts and reports their sum and mean.
pub struct BookingService {
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, request: CreateBookingRequest) -> ScheduleResult<Booking> {
        let count = request.bookings.ok_or_else(|| {
            ScheduleError::Validation("Missing required field: bookings".to_string())
        })?;
        if count < 0 {
            return Err(ScheduleError::Validation(
                "bookings must not be negative".to_string(),
            ));
        }

        let booking = self.store.insert(count).await?;
        info!("Recorded {} bookings ({})", booking.no_of_bookings, booking.id);
        Ok(booking)
    }

    pub async fn total(&self) -> ScheduleResult<i64> {
        Ok(self.store.total().await?)
    }

    pub async fn average(&self) -> ScheduleResult<f64> {
        Ok(self.store.average().await?)
    }
}
