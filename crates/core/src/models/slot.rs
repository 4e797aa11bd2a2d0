use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ScheduleError, ScheduleResult};

/// Slot kind that blocks a doctor's time instead of offering it.
pub const LEAVE_KIND: &str = "leave";

pub const MAX_KIND_LEN: usize = 50;
pub const MAX_DAY_OF_WEEK_LEN: usize = 16;
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Whether a slot of the given kind leaves the doctor available.
pub fn is_available_for(kind: Option<&str>) -> bool {
    kind != Some(LEAVE_KIND)
}

/// Full English weekday name for a calendar date, e.g. "Monday".
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// The `(clinic, doctor, date)` tuple within which slots must not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotScope {
    pub clinic_id: i32,
    pub doctor_id: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: Uuid,
    pub clinic_id: i32,
    pub doctor_id: i32,
    pub kind: Option<String>,
    pub day_of_week: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AvailabilitySlot {
    pub fn scope(&self) -> SlotScope {
        SlotScope {
            clinic_id: self.clinic_id,
            doctor_id: self.doctor_id,
            date: self.date,
        }
    }
}

/// A slot whose required fields are all present, ready to be checked and written.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCandidate {
    pub clinic_id: i32,
    pub doctor_id: i32,
    pub kind: Option<String>,
    pub day_of_week: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
}

impl SlotCandidate {
    pub fn scope(&self) -> SlotScope {
        SlotScope {
            clinic_id: self.clinic_id,
            doctor_id: self.doctor_id,
            date: self.date,
        }
    }

    pub fn is_available(&self) -> bool {
        is_available_for(self.kind.as_deref())
    }
}

/// Body accepted by the create and update slot endpoints.
///
/// Every field is optional at the wire level so that a missing field turns into
/// a validation error naming it, rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotRequest {
    pub clinic_id: Option<i32>,
    pub doctor_id: Option<i32>,
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    pub day_of_week: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: Option<String>,
}

impl SlotRequest {
    /// Checks field presence and turns the request into a candidate slot.
    ///
    /// The time range itself is not checked here; see [`crate::conflict::check_interval`].
    pub fn into_candidate(self) -> ScheduleResult<SlotCandidate> {
        let mut missing = Vec::new();
        if self.clinic_id.is_none() {
            missing.push("clinic_id");
        }
        if self.doctor_id.is_none() {
            missing.push("doctor_id");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.start_time.is_none() {
            missing.push("start_time");
        }
        if self.end_time.is_none() {
            missing.push("end_time");
        }

        let (Some(clinic_id), Some(doctor_id), Some(date), Some(start_time), Some(end_time)) = (
            self.clinic_id,
            self.doctor_id,
            self.date,
            self.start_time,
            self.end_time,
        ) else {
            return Err(ScheduleError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        if clinic_id <= 0 {
            return Err(ScheduleError::Validation(
                "clinic_id must be a positive integer".to_string(),
            ));
        }
        if doctor_id <= 0 {
            return Err(ScheduleError::Validation(
                "doctor_id must be a positive integer".to_string(),
            ));
        }

        let kind = self
            .kind
            .map(|kind| kind.trim().to_string())
            .filter(|kind| !kind.is_empty());
        let day_of_week = self
            .day_of_week
            .map(|day| day.trim().to_string())
            .filter(|day| !day.is_empty())
            .unwrap_or_else(|| weekday_name(date).to_string());

        check_length("type", kind.as_deref(), MAX_KIND_LEN)?;
        check_length("day_of_week", Some(day_of_week.as_str()), MAX_DAY_OF_WEEK_LEN)?;
        check_length("description", self.description.as_deref(), MAX_DESCRIPTION_LEN)?;

        Ok(SlotCandidate {
            clinic_id,
            doctor_id,
            kind,
            day_of_week,
            date,
            start_time,
            end_time,
            description: self.description,
        })
    }
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> ScheduleResult<()> {
    match value {
        Some(value) if value.chars().count() > max => Err(ScheduleError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters of the paginated slot listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// A normalized, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }
}

impl From<PageQuery> for Page {
    // Zero or absent values fall back to the defaults; oversized limits are capped.
    fn from(query: PageQuery) -> Self {
        let page = query.page.filter(|p| *p > 0).unwrap_or(1);
        let limit = query
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        Page { page, limit }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPage {
    pub data: Vec<AvailabilitySlot>,
    pub total_items: i64,
    pub current_page: u32,
    pub total_pages: i64,
}

impl SlotPage {
    pub fn new(data: Vec<AvailabilitySlot>, total_items: i64, page: Page) -> Self {
        let limit = i64::from(page.limit);
        Self {
            data,
            total_items,
            current_page: page.page,
            total_pages: (total_items + limit - 1) / limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSlotResponse {
    pub message: String,
}
