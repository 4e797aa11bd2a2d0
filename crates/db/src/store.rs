//! PostgreSQL implementations of the core store traits.

use async_trait::async_trait;
use docsched_core::{
    errors::StoreError,
    models::{
        booking::Booking,
        slot::{AvailabilitySlot, SlotCandidate, SlotScope},
    },
    store::{BookingStore, SlotStore, StoreResult},
};
use uuid::Uuid;

use crate::{repositories, DbPool};

/// SQLSTATE raised when a write violates an `EXCLUDE` constraint.
const EXCLUSION_VIOLATION: &str = "23P01";

/// Maps a repository failure onto the store error taxonomy.
///
/// Only the overlap exclusion constraint is singled out; every other failure
/// stays an opaque backend error.
pub fn classify(report: eyre::Report) -> StoreError {
    let is_overlap = report
        .downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == EXCLUSION_VIOLATION);

    if is_overlap {
        StoreError::Overlap
    } else {
        StoreError::Backend(report)
    }
}

#[derive(Debug, Clone)]
pub struct PgSlotStore {
    pool: DbPool,
}

impl PgSlotStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn find_slots_by_scope(&self, scope: &SlotScope) -> StoreResult<Vec<AvailabilitySlot>> {
        let rows = repositories::slot::get_slots_by_scope(
            &self.pool,
            scope.clinic_id,
            scope.doctor_id,
            scope.date,
        )
        .await
        .map_err(classify)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<AvailabilitySlot>> {
        let row = repositories::slot::get_slot_by_id(&self.pool, id)
            .await
            .map_err(classify)?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, candidate: &SlotCandidate) -> StoreResult<AvailabilitySlot> {
        let row = repositories::slot::create_slot(&self.pool, candidate)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        candidate: &SlotCandidate,
    ) -> StoreResult<Option<AvailabilitySlot>> {
        let row = repositories::slot::update_slot(&self.pool, id, candidate)
            .await
            .map_err(classify)?;
        Ok(row.map(Into::into))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        repositories::slot::delete_slot(&self.pool, id)
            .await
            .map_err(classify)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> StoreResult<(Vec<AvailabilitySlot>, i64)> {
        let (rows, total) = repositories::slot::list_slots(&self.pool, offset, limit)
            .await
            .map_err(classify)?;
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn find_slots_by_doctor(&self, doctor_id: i32) -> StoreResult<Vec<AvailabilitySlot>> {
        let rows = repositories::slot::get_slots_by_doctor_id(&self.pool, doctor_id)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert(&self, no_of_bookings: i64) -> StoreResult<Booking> {
        let row = repositories::booking::create_booking(&self.pool, no_of_bookings).await?;
        Ok(row.into())
    }

    async fn total(&self) -> StoreResult<i64> {
        Ok(repositories::booking::sum_bookings(&self.pool).await?)
    }

    async fn average(&self) -> StoreResult<f64> {
        Ok(repositories::booking::average_bookings(&self.pool).await?)
    }
}
