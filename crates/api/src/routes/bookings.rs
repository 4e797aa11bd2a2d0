use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings/sum", get(handlers::bookings::sum_bookings))
        .route("/api/bookings/avg", get(handlers::bookings::average_bookings))
}
