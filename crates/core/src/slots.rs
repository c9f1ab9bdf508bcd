//! # Slot generation
//!
//! Turns availability windows into discrete bookable slots for one date.
//!
//! Each window is cut into back-to-back slots of its duration, starting at the
//! window's start time. A trailing remainder shorter than one slot is dropped.
//! Windows are processed independently and their slots are concatenated in the
//! order the windows were given, so two overlapping windows produce
//! overlapping slots.
//!
//! Slots are emitted on whole minutes, matching their `HH:MM` wire form: a
//! window start with seconds is rounded up to the next minute and an end with
//! seconds is rounded down.
//!
//! Arithmetic is done in seconds since midnight rather than on `NaiveTime`
//! directly, because `NaiveTime` addition wraps around midnight.

use chrono::NaiveDate;

use crate::{
    calendar::{seconds_of_day, time_from_seconds},
    ids::ResourceId,
    models::{
        availability::AvailabilityWindow,
        time_slot::{SlotKind, TimeSlot},
    },
};

/// Knobs for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotPolicy {
    /// Only use windows whose weekday mask contains the queried date's weekday.
    ///
    /// Off by default: stored windows have historically been applied on every
    /// day of their date range.
    pub enforce_weekday_match: bool,
    pub kind: SlotKind,
}

/// Why a window contributed no slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowIssue {
    NonPositiveDuration(i32),
    EmptyTimeRange,
}

/// Checks a window for the configuration defects that make it yield nothing.
pub fn window_issue(window: &AvailabilityWindow, kind: SlotKind) -> Option<WindowIssue> {
    let duration = window.duration_for(kind);
    if duration <= 0 {
        Some(WindowIssue::NonPositiveDuration(duration))
    } else if window.start_time >= window.end_time {
        Some(WindowIssue::EmptyTimeRange)
    } else {
        None
    }
}

/// Whether `window` should contribute slots for `resource_id` on `date`.
pub fn window_applies(
    window: &AvailabilityWindow,
    resource_id: ResourceId,
    date: NaiveDate,
    policy: &SlotPolicy,
) -> bool {
    window.resource_id == resource_id
        && window.covers_date(date)
        && (!policy.enforce_weekday_match || window.recurs_on(date))
}

fn floor_minute(seconds: u32) -> i64 {
    i64::from(seconds / 60 * 60)
}

fn ceil_minute(seconds: u32) -> i64 {
    i64::from(seconds.div_ceil(60) * 60)
}

/// Cuts a single window into consecutive slots of the chosen duration.
///
/// Returns an empty list for a non-positive duration or when the start time is
/// not before the end time. Bounds are snapped inward to whole minutes first.
pub fn window_slots(window: &AvailabilityWindow, kind: SlotKind) -> Vec<TimeSlot> {
    if window_issue(window, kind).is_some() {
        return Vec::new();
    }

    let step = i64::from(window.duration_for(kind)) * 60;
    let end = floor_minute(seconds_of_day(window.end_time));
    let mut cursor = ceil_minute(seconds_of_day(window.start_time));
    let mut slots = Vec::new();

    while cursor < end {
        let slot_end = cursor + step;
        if slot_end > end {
            break;
        }
        // Both bounds are at most `end`, itself a valid time of day.
        let bounds = (
            time_from_seconds(cursor as u32),
            time_from_seconds(slot_end as u32),
        );
        if let (Some(start_time), Some(end_time)) = bounds {
            slots.push(TimeSlot::new(start_time, end_time));
        }
        cursor = slot_end;
    }

    slots
}

/// Generates the slots for `resource_id` on `date` from the given windows.
///
/// Windows that do not apply are skipped; the rest are expanded in order and
/// their slots concatenated. No applicable window gives an empty list.
pub fn generate_slots(
    windows: &[AvailabilityWindow],
    resource_id: ResourceId,
    date: NaiveDate,
    policy: &SlotPolicy,
) -> Vec<TimeSlot> {
    windows
        .iter()
        .filter(|window| window_applies(window, resource_id, date, policy))
        .flat_map(|window| window_slots(window, policy.kind))
        .collect()
}
