use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    conflict,
    errors::{ScheduleError, ScheduleResult, StoreError},
    locks::ScopeLocks,
    models::slot::{AvailabilitySlot, Page, PageQuery, SlotCandidate, SlotPage, SlotRequest},
    store::SlotStore,
};

fn slot_not_found(id: Uuid) -> ScheduleError {
    ScheduleError::NotFound(format!("Slot with ID {} not found", id))
}

/// Checked create, update and delete of availability slots.
///
/// The store handle is supplied by the caller; the service keeps no data of
/// its own besides the per-scope write locks.
pub struct SlotService {
    store: Arc<dyn SlotStore>,
    locks: ScopeLocks,
}

impl SlotService {
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        Self::with_locks(store, ScopeLocks::new())
    }

    /// Shares a lock registry with other services writing to the same store.
    pub fn with_locks(store: Arc<dyn SlotStore>, locks: ScopeLocks) -> Self {
        Self { store, locks }
    }

    pub fn locks(&self) -> &ScopeLocks {
        &self.locks
    }

    /// Validates the request and stores it unless it overlaps a slot in its scope.
    ///
    /// # Errors
    ///
    /// * `ScheduleError::Validation` - missing field or malformed time range
    /// * `ScheduleError::Conflict` - overlaps an existing slot for the same doctor and date
    /// * `ScheduleError::Database` - the store failed
    pub async fn create_slot(&self, request: SlotRequest) -> ScheduleResult<AvailabilitySlot> {
        let candidate = request.into_candidate()?;
        conflict::check_interval(candidate.start_time, candidate.end_time)?;

        let scope = candidate.scope();
        let _guard = self.locks.acquire(scope).await;

        let existing = self.store.find_slots_by_scope(&scope).await?;
        debug!(
            "Checking new slot for doctor {} on {} against {} existing slots",
            scope.doctor_id,
            scope.date,
            existing.len()
        );
        self.check(&candidate, &existing, None)?;

        match self.store.insert(&candidate).await {
            Ok(slot) => {
                info!("Created slot {} for doctor {} on {}", slot.id, slot.doctor_id, slot.date);
                Ok(slot)
            }
            Err(StoreError::Overlap) => Err(self.resolve_store_conflict(&candidate, None).await),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces slot `id`, re-checking it against every other slot in its new scope.
    ///
    /// # Errors
    ///
    /// * `ScheduleError::Validation` - missing field or malformed time range
    /// * `ScheduleError::NotFound` - no slot with this id
    /// * `ScheduleError::Conflict` - overlaps another slot for the same doctor and date
    /// * `ScheduleError::Database` - the store failed
    pub async fn update_slot(
        &self,
        id: Uuid,
        request: SlotRequest,
    ) -> ScheduleResult<AvailabilitySlot> {
        let candidate = request.into_candidate()?;
        conflict::check_interval(candidate.start_time, candidate.end_time)?;

        if self.store.get_by_id(id).await?.is_none() {
            return Err(slot_not_found(id));
        }

        let scope = candidate.scope();
        let _guard = self.locks.acquire(scope).await;

        let existing = self.store.find_slots_by_scope(&scope).await?;
        self.check(&candidate, &existing, Some(id))?;

        match self.store.update_by_id(id, &candidate).await {
            Ok(Some(slot)) => {
                info!("Updated slot {}", slot.id);
                Ok(slot)
            }
            Ok(None) => Err(slot_not_found(id)),
            Err(StoreError::Overlap) => {
                Err(self.resolve_store_conflict(&candidate, Some(id)).await)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Removes a slot without any conflict re-check.
    pub async fn delete_slot(&self, id: Uuid) -> ScheduleResult<()> {
        if self.store.delete_by_id(id).await? {
            info!("Deleted slot {}", id);
            Ok(())
        } else {
            Err(slot_not_found(id))
        }
    }

    pub async fn get_slot(&self, id: Uuid) -> ScheduleResult<AvailabilitySlot> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| slot_not_found(id))
    }

    pub async fn list_slots(&self, query: PageQuery) -> ScheduleResult<SlotPage> {
        let page = Page::from(query);
        let (data, total_items) = self
            .store
            .list_page(page.offset(), i64::from(page.limit))
            .await?;
        Ok(SlotPage::new(data, total_items, page))
    }

    pub async fn doctor_slots(&self, doctor_id: i32) -> ScheduleResult<Vec<AvailabilitySlot>> {
        if doctor_id <= 0 {
            return Err(ScheduleError::Validation(
                "doctor_id must be a positive integer".to_string(),
            ));
        }
        Ok(self.store.find_slots_by_doctor(doctor_id).await?)
    }

    fn check(
        &self,
        candidate: &SlotCandidate,
        existing: &[AvailabilitySlot],
        exclude_id: Option<Uuid>,
    ) -> ScheduleResult<()> {
        conflict::validate_and_check(candidate, existing, exclude_id).inspect_err(|err| {
            warn!(
                "Rejected slot for doctor {} on {}: {}",
                candidate.doctor_id, candidate.date, err
            )
        })
    }

    /// The store refused the write after our own check passed, so another
    /// process won the race. Re-read the scope to name the slot it wrote.
    async fn resolve_store_conflict(
        &self,
        candidate: &SlotCandidate,
        exclude_id: Option<Uuid>,
    ) -> ScheduleError {
        warn!(
            "Store rejected overlapping slot for doctor {} on {}",
            candidate.doctor_id, candidate.date
        );
        match self.store.find_slots_by_scope(&candidate.scope()).await {
            Ok(existing) => match conflict::find_conflict(candidate, &existing, exclude_id) {
                Some(slot) => ScheduleError::conflict_with(slot),
                None => StoreError::Overlap.into(),
            },
            Err(err) => err.into(),
        }
    }
}
