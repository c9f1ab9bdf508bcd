use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use clinicdesk_core::{
    errors::ClinicError,
    ids::ResourceId,
    models::{
        availability::{AvailabilityWindow, WeekdaySet},
        time_slot::{SlotKind, TimeSlot},
    },
    service::SlotService,
    slots::SlotPolicy,
    store::AvailabilityStore,
};
use pretty_assertions::assert_eq;

/// In-memory store that filters like the SQL query and records its calls.
struct FakeStore {
    windows: Vec<AvailabilityWindow>,
    calls: Mutex<Vec<(ResourceId, NaiveDate)>>,
    fail: bool,
}

impl FakeStore {
    fn new(windows: Vec<AvailabilityWindow>) -> Self {
        Self {
            windows,
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }
}

#[async_trait]
impl AvailabilityStore for FakeStore {
    async fn find_availability_windows(
        &self,
        resource_id: ResourceId,
        date: NaiveDate,
    ) -> eyre::Result<Vec<AvailabilityWindow>> {
        self.calls.lock().unwrap().push((resource_id, date));
        if self.fail {
            return Err(eyre::eyre!("relation \"resource_availability\" does not exist"));
        }
        Ok(self
            .windows
            .iter()
            .filter(|w| w.resource_id == resource_id && w.covers_date(date))
            .cloned()
            .collect())
    }
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn rid(id: i64) -> ResourceId {
    ResourceId::new(id).unwrap()
}

fn weekday_window(id: i64, week_days: &str) -> AvailabilityWindow {
    AvailabilityWindow {
        id,
        resource_id: rid(1),
        facility_id: None,
        start_date: d(2024, 1, 1),
        end_date: None,
        week_days: week_days.parse::<WeekdaySet>().unwrap(),
        start_time: t(9, 0),
        end_time: t(10, 0),
        consultation_duration: 30,
        followup_duration: 20,
        is_recurring: true,
    }
}

#[tokio::test]
async fn test_generate_slots_reads_store_once() {
    let store = FakeStore::new(vec![weekday_window(1, "Mon")]);
    let service = SlotService::new(&store, SlotPolicy::default());

    let slots = service.generate_slots(rid(1), d(2024, 1, 3)).await.unwrap();

    assert_eq!(
        slots,
        vec![TimeSlot::new(t(9, 0), t(9, 30)), TimeSlot::new(t(9, 30), t(10, 0))]
    );
    assert_eq!(*store.calls.lock().unwrap(), vec![(rid(1), d(2024, 1, 3))]);
}

#[tokio::test]
async fn test_generate_slots_unknown_resource_is_empty() {
    let store = FakeStore::new(vec![weekday_window(1, "Mon")]);
    let service = SlotService::new(&store, SlotPolicy::default());

    let slots = service.generate_slots(rid(99), d(2024, 1, 3)).await.unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_generate_slots_store_failure_is_database_error() {
    let store = FakeStore::failing();
    let service = SlotService::new(&store, SlotPolicy::default());

    let result = service.generate_slots(rid(1), d(2024, 1, 3)).await;

    assert!(matches!(result, Err(ClinicError::Database(_))));
}

#[tokio::test]
async fn test_generate_range_applies_weekday_policy_per_day() {
    // 2024-01-01 is a Monday
    let store = FakeStore::new(vec![weekday_window(1, "Mon,Wed")]);
    let policy = SlotPolicy {
        enforce_weekday_match: true,
        kind: SlotKind::Followup,
    };
    let service = SlotService::new(&store, policy);

    let days = service.generate_range(rid(1), d(2024, 1, 1), 3).await.unwrap();

    let counts: Vec<(NaiveDate, usize)> = days.iter().map(|day| (day.date, day.time_slots.len())).collect();
    assert_eq!(
        counts,
        vec![(d(2024, 1, 1), 3), (d(2024, 1, 2), 0), (d(2024, 1, 3), 3)]
    );
    assert_eq!(store.calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_generate_range_rejects_bad_day_counts() {
    let store = FakeStore::new(Vec::new());
    let service = SlotService::new(&store, SlotPolicy::default()).with_max_range_days(7);

    let zero = service.generate_range(rid(1), d(2024, 1, 1), 0).await;
    let too_many = service.generate_range(rid(1), d(2024, 1, 1), 8).await;

    assert!(matches!(zero, Err(ClinicError::Validation(_))));
    assert!(matches!(too_many, Err(ClinicError::Validation(_))));
    assert!(store.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_range_past_max_date_is_validation_error() {
    let store = FakeStore::new(Vec::new());
    let service = SlotService::new(&store, SlotPolicy::default());

    let result = service.generate_range(rid(1), NaiveDate::MAX, 2).await;

    assert!(matches!(result, Err(ClinicError::Validation(_))));
}
