//! Persistence collaborators consumed by the services.
//!
//! Implementations live in `docsched-db`: PostgreSQL-backed stores for the
//! server and in-memory stores for tests and local runs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::StoreError,
    models::{
        booking::Booking,
        slot::{AvailabilitySlot, SlotCandidate, SlotScope},
    },
};

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait SlotStore: Send + Sync {
    /// All slots sharing the scope, ordered by start time.
    async fn find_slots_by_scope(&self, scope: &SlotScope) -> StoreResult<Vec<AvailabilitySlot>>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<AvailabilitySlot>>;

    /// Persists a new slot and returns it with its assigned id.
    async fn insert(&self, candidate: &SlotCandidate) -> StoreResult<AvailabilitySlot>;

    /// Replaces every field of slot `id`. `None` if no such slot exists.
    async fn update_by_id(
        &self,
        id: Uuid,
        candidate: &SlotCandidate,
    ) -> StoreResult<Option<AvailabilitySlot>>;

    /// Returns whether a slot was removed.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool>;

    /// One page of slots, newest first, together with the total slot count.
    async fn list_page(&self, offset: i64, limit: i64) -> StoreResult<(Vec<AvailabilitySlot>, i64)>;

    /// Every slot of a doctor, ordered by date and start time.
    async fn find_slots_by_doctor(&self, doctor_id: i32) -> StoreResult<Vec<AvailabilitySlot>>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, no_of_bookings: i64) -> StoreResult<Booking>;

    /// Sum of all booking counts; zero when there are none.
    async fn total(&self) -> StoreResult<i64>;

    /// Mean booking count; zero when there are none.
    async fn average(&self) -> StoreResult<f64>;
}
