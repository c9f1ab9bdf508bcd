use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clinicdesk_core::{
    ids::{FacilityId, ResourceId},
    models::availability::{AvailabilityWindow, WeekdaySet},
};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityWindow {
    pub id: i64,
    pub resource_id: i64,
    pub facility_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub week_days: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub consultation_duration: i32,
    pub followup_duration: i32,
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<DbAvailabilityWindow> for AvailabilityWindow {
    type Error = eyre::Report;

    fn try_from(row: DbAvailabilityWindow) -> Result<Self> {
        let resource_id = ResourceId::new(row.resource_id)
            .wrap_err_with(|| format!("availability window {} has an invalid resource id", row.id))?;

        let facility_id = match row.facility_id {
            Some(raw) => Some(FacilityId::new(raw).wrap_err_with(|| {
                format!("availability window {} has an invalid facility id", row.id)
            })?),
            None => None,
        };

        // A bad mask should not hide the rest of the resource's schedule.
        let week_days = row.week_days.parse::<WeekdaySet>().unwrap_or_else(|e| {
            tracing::warn!(
                "availability window {} has an unreadable weekday mask {:?}: {}",
                row.id,
                row.week_days,
                e
            );
            WeekdaySet::empty()
        });

        Ok(AvailabilityWindow {
            id: row.id,
            resource_id,
            facility_id,
            start_date: row.start_date,
            end_date: row.end_date,
            week_days,
            start_time: row.start_time,
            end_time: row.end_time,
            consultation_duration: row.consultation_duration,
            followup_duration: row.followup_duration,
            is_recurring: row.is_recurring,
        })
    }
}
