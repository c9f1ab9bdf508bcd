//! # Slot Service
//!
//! Fetches a resource's windows from an [`AvailabilityStore`] and runs the slot
//! generator over them. The store is passed in by the caller; the service holds
//! no connection of its own.

use chrono::{Days, NaiveDate};
use tracing::warn;

use crate::{
    errors::{ClinicError, ClinicResult},
    ids::ResourceId,
    models::time_slot::{DaySlots, TimeSlot},
    slots::{self, SlotPolicy, WindowIssue},
    store::AvailabilityStore,
};

pub const DEFAULT_MAX_RANGE_DAYS: u32 = 14;

pub struct SlotService<'a> {
    store: &'a dyn AvailabilityStore,
    policy: SlotPolicy,
    max_range_days: u32,
}

impl<'a> SlotService<'a> {
    pub fn new(store: &'a dyn AvailabilityStore, policy: SlotPolicy) -> Self {
        Self {
            store,
            policy,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }

    pub fn with_max_range_days(mut self, max_range_days: u32) -> Self {
        self.max_range_days = max_range_days;
        self
    }

    /// Bookable slots for one resource on one date.
    ///
    /// # Errors
    ///
    /// * `ClinicError::Database` - the store failed to load windows
    pub async fn generate_slots(
        &self,
        resource_id: ResourceId,
        date: NaiveDate,
    ) -> ClinicResult<Vec<TimeSlot>> {
        let windows = self
            .store
            .find_availability_windows(resource_id, date)
            .await
            .map_err(ClinicError::Database)?;

        for window in windows
            .iter()
            .filter(|w| slots::window_applies(w, resource_id, date, &self.policy))
        {
            match slots::window_issue(window, self.policy.kind) {
                Some(WindowIssue::NonPositiveDuration(minutes)) => warn!(
                    window_id = window.id,
                    %resource_id,
                    kind = %self.policy.kind,
                    minutes,
                    "skipping availability window with non-positive slot duration"
                ),
                Some(WindowIssue::EmptyTimeRange) => warn!(
                    window_id = window.id,
                    %resource_id,
                    start = %window.start_time,
                    end = %window.end_time,
                    "skipping availability window whose start is not before its end"
                ),
                None => {}
            }
        }

        Ok(slots::generate_slots(&windows, resource_id, date, &self.policy))
    }

    /// Bookable slots for each day in `[from, from + days)`.
    ///
    /// # Errors
    ///
    /// * `ClinicError::Validation` - `days` is outside `1..=max_range_days` or
    ///   the range runs past the last representable date
    /// * `ClinicError::Database` - the store failed to load windows
    pub async fn generate_range(
        &self,
        resource_id: ResourceId,
        from: NaiveDate,
        days: u32,
    ) -> ClinicResult<Vec<DaySlots>> {
        if days == 0 || days > self.max_range_days {
            return Err(ClinicError::Validation(format!(
                "days must be between 1 and {}",
                self.max_range_days
            )));
        }

        let mut result = Vec::with_capacity(days as usize);
        for offset in 0..days {
            let date = from
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| ClinicError::Validation("date range out of bounds".to_string()))?;
            let time_slots = self.generate_slots(resource_id, date).await?;
            result.push(DaySlots { date, time_slots });
        }

        Ok(result)
    }
}
