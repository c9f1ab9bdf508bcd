use async_trait::async_trait;
use chrono::NaiveDate;
use clinicdesk_core::{
    ids::ResourceId, models::availability::AvailabilityWindow, store::AvailabilityStore,
};
use mockall::mock;

// Mock repositories for testing
mock! {
    pub AvailabilityRepo {}

    #[async_trait]
    impl AvailabilityStore for AvailabilityRepo {
        async fn find_availability_windows(
            &self,
            resource_id: ResourceId,
            date: NaiveDate,
        ) -> eyre::Result<Vec<AvailabilityWindow>>;
    }
}
