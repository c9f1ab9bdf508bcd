use crate::models::DbAvailabilityWindow;
use async_trait::async_trait;
use chrono::NaiveDate;
use clinicdesk_core::{
    ids::ResourceId, models::availability::AvailabilityWindow, store::AvailabilityStore,
};
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn find_availability_windows(
    pool: &Pool<Postgres>,
    resource_id: ResourceId,
    date: NaiveDate,
) -> Result<Vec<DbAvailabilityWindow>> {
    tracing::debug!(
        "Loading availability windows: resource_id={}, date={}",
        resource_id,
        date
    );

    let windows = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        SELECT id, resource_id, facility_id, start_date, end_date, week_days,
               start_time, end_time, consultation_duration, followup_duration,
               is_recurring, created_at, updated_at, deleted_at
        FROM resource_availability
        WHERE resource_id = $1
          AND start_date <= $2
          AND (end_date IS NULL OR end_date >= $2)
          AND deleted_at IS NULL
        ORDER BY id ASC
        "#,
    )
    .bind(resource_id.get())
    .bind(date)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Found {} availability windows", windows.len());
    Ok(windows)
}

/// [`AvailabilityStore`] backed by the `resource_availability` table.
#[derive(Debug, Clone)]
pub struct PgAvailabilityStore {
    pool: Pool<Postgres>,
}

impl PgAvailabilityStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStore for PgAvailabilityStore {
    async fn find_availability_windows(
        &self,
        resource_id: ResourceId,
        date: NaiveDate,
    ) -> Result<Vec<AvailabilityWindow>> {
        find_availability_windows(&self.pool, resource_id, date)
            .await?
            .into_iter()
            .map(AvailabilityWindow::try_from)
            .collect()
    }
}
