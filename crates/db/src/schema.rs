use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Needed for the integer equality operators inside the GiST exclusion constraint
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist;")
        .execute(pool)
        .await?;

    // Create availability_slots table
    //
    // no_overlapping_slots keeps the half-open ranges of one doctor at one
    // clinic disjoint even when writers race from separate processes.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            clinic_id INTEGER NOT NULL,
            doctor_id INTEGER NOT NULL,
            kind VARCHAR(50) NULL,
            day_of_week VARCHAR(16) NOT NULL,
            slot_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            description VARCHAR(255) NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT no_overlapping_slots EXCLUDE USING gist (
                clinic_id WITH =,
                doctor_id WITH =,
                tsrange(slot_date + start_time, slot_date + end_time, '[)') WITH &&
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            no_of_bookings BIGINT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT non_negative_bookings CHECK (no_of_bookings >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_availability_slots_scope ON availability_slots(clinic_id, doctor_id, slot_date);",
        "CREATE INDEX IF NOT EXISTS idx_availability_slots_doctor_id ON availability_slots(doctor_id);",
        "CREATE INDEX IF NOT EXISTS idx_availability_slots_created_at ON availability_slots(created_at);",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
