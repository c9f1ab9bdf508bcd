//! # Availability Handlers
//!
//! HTTP entry points for slot generation. Raw path and query strings are turned
//! into typed ids, dates and a [`SlotPolicy`] here; anything malformed is
//! rejected with a 400 before the store is touched.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use clinicdesk_core::{
    calendar::parse_calendar_date,
    errors::ClinicError,
    ids::ResourceId,
    models::time_slot::{SlotKind, SlotRangeResponse, TimeSlotsResponse},
    service::SlotService,
    slots::SlotPolicy,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::{config::parse_flag, middleware::error_handling::AppError, ApiState, SlotSettings};

/// Range length used when `days` is omitted, capped by the configured maximum.
pub const DEFAULT_RANGE_DAYS: u32 = 7;

/// Optional knobs shared by both slot endpoints
///
/// * `kind` - `consultation` (default) or `followup`
/// * `enforce_weekdays` - overrides the server's weekday policy for this request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    pub kind: Option<String>,
    pub enforce_weekdays: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub from: Option<String>,
    pub days: Option<String>,
    pub kind: Option<String>,
    pub enforce_weekdays: Option<String>,
}

fn slot_policy(
    settings: &SlotSettings,
    kind: Option<&str>,
    enforce_weekdays: Option<&str>,
) -> Result<SlotPolicy, ClinicError> {
    let kind = match kind {
        Some(raw) => raw.parse::<SlotKind>()?,
        None => SlotKind::default(),
    };

    let enforce_weekday_match = match enforce_weekdays {
        Some(raw) => parse_flag(raw).ok_or_else(|| {
            ClinicError::Validation(format!("enforceWeekdays must be true or false, got {:?}", raw))
        })?,
        None => settings.enforce_weekday_match,
    };

    Ok(SlotPolicy {
        enforce_weekday_match,
        kind,
    })
}

fn parse_days(raw: Option<&str>, settings: &SlotSettings) -> Result<u32, ClinicError> {
    match raw {
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            ClinicError::Validation(format!("days must be a positive integer, got {:?}", raw))
        }),
        None => Ok(DEFAULT_RANGE_DAYS.min(settings.max_range_days)),
    }
}

/// Lists the bookable slots of one resource on one date
///
/// # Endpoint
///
/// ```text
/// GET /api/resourceAvailability/:resourceId/:date?kind=followup&enforceWeekdays=true
/// ```
///
/// `date` is `YYYY-MM-DD`; a full ISO timestamp is accepted and only its date
/// part is used.
///
/// # Errors
///
/// * `ClinicError::Validation` - malformed id, date, kind or flag
/// * `ClinicError::Database` - the availability store failed
#[axum::debug_handler]
pub async fn get_time_slots(
    State(state): State<Arc<ApiState>>,
    Path((resource_id, date)): Path<(String, String)>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<TimeSlotsResponse>, AppError> {
    let resource_id: ResourceId = resource_id.parse()?;
    let date = parse_calendar_date(&date)?;
    let policy = slot_policy(
        &state.settings,
        query.kind.as_deref(),
        query.enforce_weekdays.as_deref(),
    )?;

    let service = SlotService::new(state.store.as_ref(), policy);
    let time_slots = service.generate_slots(resource_id, date).await?;

    debug!(
        %resource_id,
        %date,
        kind = %policy.kind,
        enforce_weekdays = policy.enforce_weekday_match,
        slots = time_slots.len(),
        "generated time slots"
    );

    Ok(Json(TimeSlotsResponse { time_slots }))
}

/// Lists slots for each day of a date range
///
/// ```text
/// GET /api/resources/:resourceId/slots?from=2024-01-01&days=7
/// ```
#[axum::debug_handler]
pub async fn get_slot_range(
    State(state): State<Arc<ApiState>>,
    Path(resource_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<SlotRangeResponse>, AppError> {
    let resource_id: ResourceId = resource_id.parse()?;
    let from = query
        .from
        .as_deref()
        .ok_or_else(|| ClinicError::Validation("from is required".to_string()))
        .and_then(parse_calendar_date)?;
    let days = parse_days(query.days.as_deref(), &state.settings)?;
    let policy = slot_policy(
        &state.settings,
        query.kind.as_deref(),
        query.enforce_weekdays.as_deref(),
    )?;

    let service = SlotService::new(state.store.as_ref(), policy)
        .with_max_range_days(state.settings.max_range_days);
    let days = service.generate_range(resource_id, from, days).await?;

    debug!(
        %resource_id,
        %from,
        days = days.len(),
        kind = %policy.kind,
        "generated slot range"
    );

    Ok(Json(SlotRangeResponse { resource_id, days }))
}
