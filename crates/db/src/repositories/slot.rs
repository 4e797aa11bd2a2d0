use crate::models::DbAvailabilitySlot;
use chrono::{NaiveDate, Utc};
use docsched_core::models::slot::SlotCandidate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const SLOT_COLUMNS: &str = "id, clinic_id, doctor_id, kind, day_of_week, slot_date, start_time, end_time, description, is_available, created_at, updated_at";

pub async fn create_slot(
    pool: &Pool<Postgres>,
    candidate: &SlotCandidate,
) -> Result<DbAvailabilitySlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating slot: id={}, clinic_id={}, doctor_id={}, date={}, {}-{}",
        id,
        candidate.clinic_id,
        candidate.doctor_id,
        candidate.date,
        candidate.start_time,
        candidate.end_time
    );

    let slot = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        r#"
        INSERT INTO availability_slots
            (id, clinic_id, doctor_id, kind, day_of_week, slot_date, start_time, end_time,
             description, is_available, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
        RETURNING {SLOT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(candidate.clinic_id)
    .bind(candidate.doctor_id)
    .bind(candidate.kind.as_deref())
    .bind(&candidate.day_of_week)
    .bind(candidate.date)
    .bind(candidate.start_time)
    .bind(candidate.end_time)
    .bind(candidate.description.as_deref())
    .bind(candidate.is_available())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAvailabilitySlot>> {
    tracing::debug!("Getting slot by id: {}", id);

    let slot = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        r#"
        SELECT {SLOT_COLUMNS}
        FROM availability_slots
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn get_slots_by_scope(
    pool: &Pool<Postgres>,
    clinic_id: i32,
    doctor_id: i32,
    date: NaiveDate,
) -> Result<Vec<DbAvailabilitySlot>> {
    let slots = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        r#"
        SELECT {SLOT_COLUMNS}
        FROM availability_slots
        WHERE clinic_id = $1 AND doctor_id = $2 AND slot_date = $3
        ORDER BY start_time ASC
        "#
    ))
    .bind(clinic_id)
    .bind(doctor_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    tracing::debug!(
        "Found {} slots for clinic_id={}, doctor_id={}, date={}",
        slots.len(),
        clinic_id,
        doctor_id,
        date
    );
    Ok(slots)
}

pub async fn get_slots_by_doctor_id(
    pool: &Pool<Postgres>,
    doctor_id: i32,
) -> Result<Vec<DbAvailabilitySlot>> {
    let slots = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        r#"
        SELECT {SLOT_COLUMNS}
        FROM availability_slots
        WHERE doctor_id = $1
        ORDER BY slot_date ASC, start_time ASC
        "#
    ))
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn update_slot(
    pool: &Pool<Postgres>,
    id: Uuid,
    candidate: &SlotCandidate,
) -> Result<Option<DbAvailabilitySlot>> {
    tracing::debug!("Updating slot: id={}", id);

    let slot = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        r#"
        UPDATE availability_slots
        SET clinic_id = $2, doctor_id = $3, kind = $4, day_of_week = $5, slot_date = $6,
            start_time = $7, end_time = $8, description = $9, is_available = $10,
            updated_at = $11
        WHERE id = $1
        RETURNING {SLOT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(candidate.clinic_id)
    .bind(candidate.doctor_id)
    .bind(candidate.kind.as_deref())
    .bind(&candidate.day_of_week)
    .bind(candidate.date)
    .bind(candidate.start_time)
    .bind(candidate.end_time)
    .bind(candidate.description.as_deref())
    .bind(candidate.is_available())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn delete_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM availability_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// One page of slots, newest first, plus the total row count.
///
/// Both queries run in one REPEATABLE READ transaction so the count and the
/// page come from the same snapshot.
pub async fn list_slots(
    pool: &Pool<Postgres>,
    offset: i64,
    limit: i64,
) -> Result<(Vec<DbAvailabilitySlot>, i64)> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
        .execute(&mut *tx)
        .await?;

    let slots = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        r#"
        SELECT {SLOT_COLUMNS}
        FROM availability_slots
        ORDER BY created_at DESC, id ASC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(&mut *tx)
    .await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM availability_slots")
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!("Listed {} of {} slots at offset {}", slots.len(), total, offset);
    Ok((slots, total))
}
