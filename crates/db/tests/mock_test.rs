use chrono::{NaiveDate, NaiveTime};
use clinicdesk_core::{
    errors::ClinicError,
    ids::ResourceId,
    models::{availability::{AvailabilityWindow, WeekdaySet}, time_slot::TimeSlot},
    service::SlotService,
    slots::SlotPolicy,
};
use clinicdesk_db::mock::MockAvailabilityRepo;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;

fn window() -> AvailabilityWindow {
    AvailabilityWindow {
        id: 1,
        resource_id: ResourceId::new(5).unwrap(),
        facility_id: None,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: None,
        week_days: WeekdaySet::all(),
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        consultation_duration: 60,
        followup_duration: 30,
        is_recurring: true,
    }
}

#[tokio::test]
async fn test_service_reads_through_mock_store() {
    let resource_id = ResourceId::new(5).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

    let mut store = MockAvailabilityRepo::new();
    store
        .expect_find_availability_windows()
        .with(eq(resource_id), eq(date))
        .times(1)
        .returning(|_, _| Ok(vec![window()]));

    let service = SlotService::new(&store, SlotPolicy::default());
    let slots = service.generate_slots(resource_id, date).await.unwrap();

    assert_eq!(
        slots,
        vec![TimeSlot::new(
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        )]
    );
}

#[tokio::test]
async fn test_mock_store_failure_surfaces_as_database_error() {
    let mut store = MockAvailabilityRepo::new();
    store
        .expect_find_availability_windows()
        .returning(|_, _| Err(eyre::eyre!("connection refused")));

    let service = SlotService::new(&store, SlotPolicy::default());
    let result = service
        .generate_slots(
            ResourceId::new(5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
        )
        .await;

    assert!(matches!(result, Err(ClinicError::Database(_))));
}
