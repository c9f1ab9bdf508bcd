#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime};
use clinicdesk_api::{app, ApiState, SlotSettings};
use clinicdesk_core::{
    ids::ResourceId,
    models::availability::{AvailabilityWindow, WeekdaySet},
};
use clinicdesk_db::mock::MockAvailabilityRepo;

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn rid(id: i64) -> ResourceId {
    ResourceId::new(id).unwrap()
}

/// Window for resource 1 over all of 2024, Mon-Fri mask.
pub fn window(id: i64, start: NaiveTime, end: NaiveTime, duration: i32) -> AvailabilityWindow {
    AvailabilityWindow {
        id,
        resource_id: rid(1),
        facility_id: None,
        start_date: d(2024, 1, 1),
        end_date: Some(d(2024, 12, 31)),
        week_days: "Mon,Tue,Wed,Thu,Fri".parse::<WeekdaySet>().unwrap(),
        start_time: start,
        end_time: end,
        consultation_duration: duration,
        followup_duration: 15,
        is_recurring: true,
    }
}

pub fn server_with(store: MockAvailabilityRepo, settings: SlotSettings) -> TestServer {
    let state = Arc::new(ApiState {
        store: Arc::new(store),
        settings,
    });
    TestServer::new(app(state)).unwrap()
}

pub fn server(store: MockAvailabilityRepo) -> TestServer {
    server_with(store, SlotSettings::default())
}

/// A mock that fails the test if the store is ever queried.
pub fn untouched_store() -> MockAvailabilityRepo {
    let mut store = MockAvailabilityRepo::new();
    store.expect_find_availability_windows().never();
    store
}
