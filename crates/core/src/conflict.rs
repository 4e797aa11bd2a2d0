//! # Availability Conflict Checker
//!
//! Decides whether a candidate slot may be stored next to the slots already
//! held for the same doctor, clinic and date.
//!
//! Slots are half-open intervals `[start, end)`. Two intervals `a` and `b`
//! overlap iff
//!
//! ```text
//! a.start < b.end && b.start < a.end
//! ```
//!
//! This covers partial overlap on either edge and containment in either
//! direction. Back-to-back slots (one ending exactly when the next starts) do
//! not overlap.
//!
//! Everything here is pure: the caller fetches the comparison set from its
//! store and persists the candidate afterwards.

use chrono::NaiveTime;
use tracing::debug;
use uuid::Uuid;

use crate::{
    errors::{ScheduleError, ScheduleResult},
    models::slot::{AvailabilitySlot, SlotCandidate},
};

/// Rejects empty and inverted time ranges.
pub fn check_interval(start: NaiveTime, end: NaiveTime) -> ScheduleResult<()> {
    if start >= end {
        return Err(ScheduleError::Validation(format!(
            "start_time ({}) must be before end_time ({})",
            start, end
        )));
    }
    Ok(())
}

/// Half-open interval overlap test.
pub fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Returns the first slot in `existing` that the candidate would overlap.
///
/// Slots outside the candidate's scope are ignored, as is the slot whose id
/// equals `exclude_id` (the slot being updated).
pub fn find_conflict<'a>(
    candidate: &SlotCandidate,
    existing: &'a [AvailabilitySlot],
    exclude_id: Option<Uuid>,
) -> Option<&'a AvailabilitySlot> {
    let scope = candidate.scope();
    existing
        .iter()
        .filter(|slot| Some(slot.id) != exclude_id)
        .filter(|slot| slot.scope() == scope)
        .find(|slot| {
            overlaps(
                candidate.start_time,
                candidate.end_time,
                slot.start_time,
                slot.end_time,
            )
        })
}

/// Validates the candidate's range and checks it against the slots already in its scope.
///
/// # Errors
///
/// * `ScheduleError::Validation` - `start_time >= end_time`, regardless of `existing`
/// * `ScheduleError::Conflict` - the candidate overlaps a slot other than `exclude_id`
pub fn validate_and_check(
    candidate: &SlotCandidate,
    existing: &[AvailabilitySlot],
    exclude_id: Option<Uuid>,
) -> ScheduleResult<()> {
    check_interval(candidate.start_time, candidate.end_time)?;

    match find_conflict(candidate, existing, exclude_id) {
        Some(slot) => {
            debug!(
                "Candidate {}-{} conflicts with slot {} ({}-{})",
                candidate.start_time, candidate.end_time, slot.id, slot.start_time, slot.end_time
            );
            Err(ScheduleError::conflict_with(slot))
        }
        None => Ok(()),
    }
}
