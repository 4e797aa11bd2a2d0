//! In-memory stores with the same overlap guarantee as the PostgreSQL schema.
//!
//! Used by the API and service tests.

use async_trait::async_trait;
use chrono::Utc;
use docsched_core::{
    conflict,
    errors::StoreError,
    models::{
        booking::Booking,
        slot::{AvailabilitySlot, SlotCandidate, SlotScope},
    },
    store::{BookingStore, SlotStore, StoreResult},
};
use tokio::sync::RwLock;
use uuid::Uuid;

fn materialize(id: Uuid, candidate: &SlotCandidate, created_at: chrono::DateTime<Utc>) -> AvailabilitySlot {
    AvailabilitySlot {
        id,
        clinic_id: candidate.clinic_id,
        doctor_id: candidate.doctor_id,
        kind: candidate.kind.clone(),
        day_of_week: candidate.day_of_week.clone(),
        date: candidate.date,
        start_time: candidate.start_time,
        end_time: candidate.end_time,
        description: candidate.description.clone(),
        is_available: candidate.is_available(),
        created_at,
        updated_at: Utc::now(),
    }
}

/// Slots kept in insertion order, oldest first.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RwLock<Vec<AvailabilitySlot>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a slot as-is, bypassing every check. Lets tests plant the rows
    /// another process would have written.
    pub async fn seed(&self, slot: AvailabilitySlot) {
        self.slots.write().await.push(slot);
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn find_slots_by_scope(&self, scope: &SlotScope) -> StoreResult<Vec<AvailabilitySlot>> {
        let mut found: Vec<_> = self
            .slots
            .read()
            .await
            .iter()
            .filter(|slot| slot.scope() == *scope)
            .cloned()
            .collect();
        found.sort_by_key(|slot| slot.start_time);
        Ok(found)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<AvailabilitySlot>> {
        Ok(self
            .slots
            .read()
            .await
            .iter()
            .find(|slot| slot.id == id)
            .cloned())
    }

    async fn insert(&self, candidate: &SlotCandidate) -> StoreResult<AvailabilitySlot> {
        let mut slots = self.slots.write().await;
        if conflict::find_conflict(candidate, &slots, None).is_some() {
            return Err(StoreError::Overlap);
        }

        let slot = materialize(Uuid::new_v4(), candidate, Utc::now());
        slots.push(slot.clone());
        Ok(slot)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        candidate: &SlotCandidate,
    ) -> StoreResult<Option<AvailabilitySlot>> {
        let mut slots = self.slots.write().await;
        if conflict::find_conflict(candidate, &slots, Some(id)).is_some() {
            return Err(StoreError::Overlap);
        }

        let Some(current) = slots.iter_mut().find(|slot| slot.id == id) else {
            return Ok(None);
        };
        *current = materialize(id, candidate, current.created_at);
        Ok(Some(current.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let mut slots = self.slots.write().await;
        let before = slots.len();
        slots.retain(|slot| slot.id != id);
        Ok(slots.len() != before)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> StoreResult<(Vec<AvailabilitySlot>, i64)> {
        let slots = self.slots.read().await;
        let total = slots.len() as i64;
        let page = slots
            .iter()
            .rev()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn find_slots_by_doctor(&self, doctor_id: i32) -> StoreResult<Vec<AvailabilitySlot>> {
        let mut found: Vec<_> = self
            .slots
            .read()
            .await
            .iter()
            .filter(|slot| slot.doctor_id == doctor_id)
            .cloned()
            .collect();
        found.sort_by_key(|slot| (slot.date, slot.start_time));
        Ok(found)
    }
}

#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    bookings: RwLock<Vec<Booking>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert(&self, no_of_bookings: i64) -> StoreResult<Booking> {
        let booking = Booking {
            id: Uuid::new_v4(),
            no_of_bookings,
            created_at: Utc::now(),
        };
        self.bookings.write().await.push(booking.clone());
        Ok(booking)
    }

    async fn total(&self) -> StoreResult<i64> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .map(|booking| booking.no_of_bookings)
            .sum())
    }

    async fn average(&self) -> StoreResult<f64> {
        let bookings = self.bookings.read().await;
        if bookings.is_empty() {
            return Ok(0.0);
        }
        let total: i64 = bookings.iter().map(|booking| booking.no_of_bookings).sum();
        Ok(total as f64 / bookings.len() as f64)
    }
}
