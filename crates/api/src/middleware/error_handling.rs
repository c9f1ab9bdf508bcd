//! # Error Handling Middleware
//!
//! Maps `ClinicError` values to HTTP status codes and a JSON body of the form
//! `{"error": "<message>"}`, so every endpoint fails the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinicdesk_core::errors::ClinicError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything that yields a
/// `ClinicError` or an `eyre::Report`.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinicdesk_api::middleware::error_handling::AppError;
/// use clinicdesk_core::ids::ResourceId;
///
/// async fn handler(raw_id: String) -> Result<Json<i64>, AppError> {
///     let resource_id: ResourceId = raw_id.parse()?;
///     Ok(Json(resource_id.get()))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClinicError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClinicError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Lets handlers use `?` on `ClinicResult` values.
impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        AppError(err)
    }
}

/// Untyped reports only come from the data layer, so they are treated as
/// database failures.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClinicError::Database(err))
    }
}

/// Maps a ClinicError straight to an HTTP response.
pub fn map_error(err: ClinicError) -> Response {
    AppError(err).into_response()
}
