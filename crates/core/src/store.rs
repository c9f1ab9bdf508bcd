//! The data-access seam between slot generation and persistent storage.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;

use crate::{ids::ResourceId, models::availability::AvailabilityWindow};

/// Read-only source of availability windows.
///
/// Implementations must return every window of `resource_id` whose date range
/// contains `date`, in a stable order.
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    async fn find_availability_windows(
        &self,
        resource_id: ResourceId,
        date: NaiveDate,
    ) -> Result<Vec<AvailabilityWindow>>;
}
