use axum::{
    body::to_bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, NaiveTime, Utc};
use docsched_api::middleware::error_handling::{handle_middleware_error, map_error, AppError};
use docsched_core::{
    errors::{ScheduleError, StoreError},
    models::slot::AvailabilitySlot,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn slot() -> AvailabilitySlot {
    AvailabilitySlot {
        id: Uuid::new_v4(),
        clinic_id: 1,
        doctor_id: 7,
        kind: None,
        day_of_week: "Monday".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        description: None,
        is_available: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[rstest]
#[case::not_found(ScheduleError::NotFound("Slot".into()), StatusCode::NOT_FOUND)]
#[case::validation(ScheduleError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case::conflict(ScheduleError::conflict_with(&slot()), StatusCode::CONFLICT)]
#[case::database(ScheduleError::Database(eyre::eyre!("down")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn errors_map_to_status_codes(#[case] error: ScheduleError, #[case] status: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), status);
}

#[tokio::test]
async fn conflict_body_names_the_slot() {
    let existing = slot();

    let response = map_error(ScheduleError::conflict_with(&existing));
    let body = body_json(response).await;

    assert_eq!(body["conflicting_slot"]["id"], json!(existing.id));
    assert_eq!(body["conflicting_slot"]["doctor_id"], json!(7));
}

#[tokio::test]
async fn unresolved_store_overlap_is_still_a_conflict() {
    let response = AppError::from(StoreError::Overlap).into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["conflicting_slot"], Value::Null);
}

#[tokio::test]
async fn server_errors_hide_their_details() {
    let response = map_error(ScheduleError::Database(eyre::eyre!(
        "password authentication failed for user postgres"
    )));

    let body = body_json(response).await;

    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn timeouts_become_request_timeout() {
    let response = handle_middleware_error(Box::new(tower::timeout::error::Elapsed::new())).await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn other_middleware_failures_are_internal() {
    let error = std::io::Error::new(std::io::ErrorKind::Other, "layer failed");

    let response = handle_middleware_error(Box::new(error)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
