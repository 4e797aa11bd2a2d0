use std::sync::Arc;

use axum_test::TestServer;
use docsched_api::{app, ApiState};
use docsched_db::{MemoryBookingStore, MemorySlotStore};
use serde_json::{json, Value};

pub struct TestContext {
    // Kept so tests can plant rows behind the service's back
    pub slot_store: Arc<MemorySlotStore>,
    pub booking_store: Arc<MemoryBookingStore>,
    pub server: TestServer,
}

impl TestContext {
    pub fn new() -> Self {
        let slot_store = Arc::new(MemorySlotStore::new());
        let booking_store = Arc::new(MemoryBookingStore::new());
        let state = Arc::new(ApiState::new(slot_store.clone(), booking_store.clone()));
        let server = TestServer::new(app(state)).unwrap();

        Self {
            slot_store,
            booking_store,
            server,
        }
    }
}

/// Request body for doctor 7 at clinic 1 on Monday 2025-03-10.
pub fn slot_body(start: &str, end: &str) -> Value {
    json!({
        "clinic_id": 1,
        "doctor_id": 7,
        "date": "2025-03-10",
        "start_time": start,
        "end_time": end,
    })
}
