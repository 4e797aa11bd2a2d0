use axum::http::StatusCode;
use chrono::NaiveTime;
use docsched_core::models::slot::{AvailabilitySlot, SlotPage};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{slot_body, TestContext};

async fn create(ctx: &TestContext, start: &str, end: &str) -> AvailabilitySlot {
    let response = ctx.server.post("/api/slots").json(&slot_body(start, end)).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<AvailabilitySlot>()
}

#[test_log::test(tokio::test)]
async fn create_slot_returns_created_slot() {
    let ctx = TestContext::new();

    let slot = create(&ctx, "09:00:00", "10:00:00").await;

    assert_eq!(slot.doctor_id, 7);
    assert_eq!(slot.day_of_week, "Monday");
    assert_eq!(slot.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    assert!(slot.is_available);
}

#[tokio::test]
async fn leave_slot_is_not_available() {
    let ctx = TestContext::new();
    let mut body = slot_body("12:00:00", "13:00:00");
    body["type"] = json!("leave");
    body["description"] = json!("lunch");

    let response = ctx.server.post("/api/slots").json(&body).await;

    response.assert_status(StatusCode::CREATED);
    let slot = response.json::<AvailabilitySlot>();
    assert_eq!(slot.kind.as_deref(), Some("leave"));
    assert!(!slot.is_available);
}

#[tokio::test]
async fn overlapping_create_is_rejected_with_the_conflicting_slot() {
    let ctx = TestContext::new();
    let existing = create(&ctx, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&slot_body("09:30:00", "10:30:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["conflicting_slot"]["id"], json!(existing.id));
    assert!(body["error"].as_str().unwrap().contains("overlaps"));
}

#[tokio::test]
async fn back_to_back_slots_are_accepted() {
    let ctx = TestContext::new();
    create(&ctx, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&slot_body("10:00:00", "11:00:00"))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn same_range_for_another_doctor_is_accepted() {
    let ctx = TestContext::new();
    create(&ctx, "09:00:00", "10:00:00").await;
    let mut body = slot_body("09:00:00", "10:00:00");
    body["doctor_id"] = json!(8);

    let response = ctx.server.post("/api/slots").json(&body).await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn inverted_range_is_a_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/slots")
        .json(&slot_body("11:00:00", "10:00:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_fields_are_named_in_the_error() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({ "clinic_id": 1, "date": "2025-03-10" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(
        body["error"],
        json!("Validation error: Missing required fields: doctor_id, start_time, end_time")
    );
}

#[tokio::test]
async fn get_slot_round_trips_and_unknown_id_is_not_found() {
    let ctx = TestContext::new();
    let slot = create(&ctx, "09:00:00", "10:00:00").await;

    let found = ctx.server.get(&format!("/api/slots/{}", slot.id)).await;
    found.assert_status_ok();
    assert_eq!(found.json::<AvailabilitySlot>().id, slot.id);

    let missing = ctx
        .server
        .get(&format!("/api/slots/{}", Uuid::new_v4()))
        .expect_failure()
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_slot_within_its_own_range_succeeds() {
    let ctx = TestContext::new();
    let slot = create(&ctx, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .put(&format!("/api/slots/{}", slot.id))
        .json(&slot_body("09:15:00", "10:15:00"))
        .await;

    response.assert_status_ok();
    let updated = response.json::<AvailabilitySlot>();
    assert_eq!(updated.id, slot.id);
    assert_eq!(updated.end_time, NaiveTime::from_hms_opt(10, 15, 0).unwrap());
}

#[tokio::test]
async fn update_into_a_neighbour_is_a_conflict() {
    let ctx = TestContext::new();
    let first = create(&ctx, "09:00:00", "10:00:00").await;
    let second = create(&ctx, "10:00:00", "11:00:00").await;

    let response = ctx
        .server
        .put(&format!("/api/slots/{}", second.id))
        .json(&slot_body("09:30:00", "11:00:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["conflicting_slot"]["id"], json!(first.id));
}

#[tokio::test]
async fn update_unknown_slot_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put(&format!("/api/slots/{}", Uuid::new_v4()))
        .json(&slot_body("09:00:00", "10:00:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_slot_frees_the_range() {
    let ctx = TestContext::new();
    let slot = create(&ctx, "09:00:00", "10:00:00").await;

    let response = ctx.server.delete(&format!("/api/slots/{}", slot.id)).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Slot deleted successfully" })
    );

    create(&ctx, "09:30:00", "10:30:00").await;

    let again = ctx
        .server
        .delete(&format!("/api/slots/{}", slot.id))
        .expect_failure()
        .await;
    again.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_slots_paginates_newest_first() {
    let ctx = TestContext::new();
    let mut created = Vec::new();
    for hour in 8..15 {
        let slot = create(&ctx, &format!("{:02}:00:00", hour), &format!("{:02}:00:00", hour + 1)).await;
        created.push(slot.id);
    }

    let response = ctx
        .server
        .get("/api/slots")
        .add_query_param("page", 2)
        .add_query_param("limit", 3)
        .await;

    response.assert_status_ok();
    let page = response.json::<SlotPage>();
    assert_eq!(page.total_items, 7);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 3);
    let ids: Vec<Uuid> = page.data.iter().map(|slot| slot.id).collect();
    assert_eq!(ids, vec![created[3], created[2], created[1]]);
}

#[tokio::test]
async fn list_slots_uses_default_page_size() {
    let ctx = TestContext::new();
    for hour in 8..14 {
        create(&ctx, &format!("{:02}:00:00", hour), &format!("{:02}:30:00", hour)).await;
    }

    let page = ctx.server.get("/api/slots").await.json::<SlotPage>();

    assert_eq!(page.data.len(), 5);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn doctor_slots_are_ordered_by_date_and_time() {
    let ctx = TestContext::new();
    let late = create(&ctx, "15:00:00", "16:00:00").await;
    let early = create(&ctx, "08:00:00", "09:00:00").await;
    let mut other_doctor = slot_body("08:00:00", "09:00:00");
    other_doctor["doctor_id"] = json!(8);
    ctx.server.post("/api/slots").json(&other_doctor).await;

    let response = ctx.server.get("/api/doctors/7/slots").await;

    response.assert_status_ok();
    let ids: Vec<Uuid> = response
        .json::<Vec<AvailabilitySlot>>()
        .iter()
        .map(|slot| slot.id)
        .collect();
    assert_eq!(ids, vec![early.id, late.id]);
}

#[tokio::test]
async fn doctor_slots_rejects_non_positive_id() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/doctors/0/slots")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn slots_planted_in_the_store_are_checked_too() {
    let ctx = TestContext::new();
    let mut planted = create(&ctx, "09:00:00", "10:00:00").await;
    ctx.server.delete(&format!("/api/slots/{}", planted.id)).await;
    planted.id = Uuid::new_v4();
    ctx.slot_store.seed(planted.clone()).await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&slot_body("09:45:00", "10:15:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["conflicting_slot"]["id"], json!(planted.id));
}

#[rstest::rstest]
#[case::hour_out_of_range("start_time", json!("25:00:00"))]
#[case::id_not_a_number("clinic_id", json!("abc"))]
#[case::date_not_a_date("date", json!("10/03/2025"))]
#[tokio::test]
async fn malformed_body_field_is_a_json_bad_request(#[case] field: &str, #[case] value: Value) {
    let ctx = TestContext::new();
    let mut body = slot_body("09:00:00", "10:00:00");
    body[field] = value;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&body)
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error = response.json::<Value>();
    assert!(error["error"].as_str().unwrap().starts_with("Validation error:"));
}

#[tokio::test]
async fn malformed_update_body_is_a_json_bad_request() {
    let ctx = TestContext::new();
    let slot = create(&ctx, "09:00:00", "10:00:00").await;
    let mut body = slot_body("09:00:00", "10:00:00");
    body["end_time"] = json!("noon");

    let response = ctx
        .server
        .put(&format!("/api/slots/{}", slot.id))
        .json(&body)
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[rstest::rstest]
#[case::slot_id("/api/slots/not-a-uuid")]
#[case::doctor_id("/api/doctors/abc/slots")]
#[case::page_number("/api/slots?page=first")]
#[tokio::test]
async fn malformed_path_or_query_is_a_json_bad_request(#[case] uri: &str) {
    let ctx = TestContext::new();

    let response = ctx.server.get(uri).expect_failure().await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error = response.json::<Value>();
    assert!(error["error"].as_str().unwrap().starts_with("Validation error:"));
}

#[tokio::test]
async fn malformed_slot_id_on_delete_is_a_json_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .delete("/api/slots/42")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}
