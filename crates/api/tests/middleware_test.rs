use axum::{body::to_bytes, http::StatusCode};
use clinicdesk_api::middleware::error_handling::{map_error, AppError};
use clinicdesk_core::errors::ClinicError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

#[rstest]
#[case(ClinicError::NotFound("resource 9".to_string()), StatusCode::NOT_FOUND)]
#[case(ClinicError::Validation("bad date".to_string()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::Database(eyre::eyre!("pool timed out")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    ClinicError::Internal(Box::new(std::io::Error::other("disk full"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: ClinicError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(ClinicError::Validation("days must be between 1 and 14".to_string()));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body,
        json!({ "error": "Validation error: days must be between 1 and 14" })
    );
}

#[test]
fn test_eyre_report_converts_to_database_error() {
    let err: AppError = eyre::eyre!("connection refused").into();

    assert!(matches!(err.0, ClinicError::Database(_)));
}
