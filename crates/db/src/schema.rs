use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create facilities table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS facilities (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NULL,
            deleted_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create resources table (physicians, nurses, rooms)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resources (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            resource_type VARCHAR(64) NOT NULL,
            description TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NULL,
            deleted_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create resource_availability table. Rows with start_time >= end_time are
    // allowed; slot generation treats them as empty.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resource_availability (
            id BIGSERIAL PRIMARY KEY,
            resource_id BIGINT NOT NULL REFERENCES resources(id),
            facility_id BIGINT NULL REFERENCES facilities(id),
            start_date DATE NOT NULL,
            end_date DATE NULL,
            week_days TEXT NOT NULL DEFAULT '',
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            consultation_duration INTEGER NOT NULL,
            followup_duration INTEGER NOT NULL,
            is_recurring BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NULL,
            deleted_at TIMESTAMP WITH TIME ZONE NULL,
            CONSTRAINT valid_date_range CHECK (end_date IS NULL OR end_date >= start_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_resource_availability_resource_id ON resource_availability(resource_id)",
        "CREATE INDEX IF NOT EXISTS idx_resource_availability_dates ON resource_availability(start_date, end_date)",
        "CREATE INDEX IF NOT EXISTS idx_resource_availability_facility_id ON resource_availability(facility_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
