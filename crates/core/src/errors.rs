use thiserror::Error;

use crate::models::slot::AvailabilitySlot;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        conflicting: Option<Box<AvailabilitySlot>>,
    },

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ScheduleError {
    /// Builds a conflict error that points at the slot already occupying the range.
    pub fn conflict_with(slot: &AvailabilitySlot) -> Self {
        ScheduleError::Conflict {
            message: format!(
                "slot overlaps existing slot {} ({} - {}) on {}",
                slot.id, slot.start_time, slot.end_time, slot.date
            ),
            conflicting: Some(Box::new(slot.clone())),
        }
    }

    /// The slot that caused a conflict, if one was identified.
    pub fn conflicting_slot(&self) -> Option<&AvailabilitySlot> {
        match self {
            ScheduleError::Conflict { conflicting, .. } => conflicting.as_deref(),
            _ => None,
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Failures reported by a persistence collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store itself refused a write because it would overlap a slot in the same scope.
    #[error("write rejected by the store's overlap constraint")]
    Overlap,

    #[error(transparent)]
    Backend(#[from] eyre::Report),
}

impl From<StoreError> for ScheduleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Overlap => ScheduleError::Conflict {
                message: "slot overlaps an existing slot in the same scope".to_string(),
                conflicting: None,
            },
            StoreError::Backend(report) => ScheduleError::Database(report),
        }
    }
}
