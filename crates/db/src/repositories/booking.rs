use crate::models::DbBooking;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_booking(pool: &Pool<Postgres>, no_of_bookings: i64) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, no_of_bookings, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, no_of_bookings, created_at
        "#,
    )
    .bind(id)
    .bind(no_of_bookings)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

pub async fn sum_bookings(pool: &Pool<Postgres>) -> Result<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(no_of_bookings), 0)::BIGINT FROM bookings",
    )
    .fetch_one(pool)
    .await?;

    Ok(total)
}

pub async fn average_bookings(pool: &Pool<Postgres>) -> Result<f64> {
    let average = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(AVG(no_of_bookings), 0)::FLOAT8 FROM bookings",
    )
    .fetch_one(pool)
    .await?;

    Ok(average)
}
