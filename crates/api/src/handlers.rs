use axum::http::Uri;
use clinicdesk_core::errors::ClinicError;

use crate::middleware::error_handling::AppError;

pub mod availability;

/// Fallback for unknown paths, so they get the same JSON error body as everything else.
pub async fn not_found(uri: Uri) -> AppError {
    AppError(ClinicError::NotFound(format!("no route for {}", uri.path())))
}
