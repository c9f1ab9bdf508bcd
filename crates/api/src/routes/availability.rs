use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/resourceAvailability/:resource_id/:date",
            get(handlers::availability::get_time_slots),
        )
        .route(
            "/api/resources/:resource_id/slots",
            get(handlers::availability::get_slot_range),
        )
}
