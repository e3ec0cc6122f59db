//! Tests for `AppError` to HTTP response mapping.
//!
//! These call `IntoResponse` directly and need no server or database.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use bookmyshoot_api::error::AppError;
use bookmyshoot_core::error::CoreError;
use http_body_util::BodyExt;
use validator::Validate;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Booking",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Booking with id 42 not found");
}

#[tokio::test]
async fn slot_conflict_returns_409_with_its_own_code() {
    let err = AppError::Core(CoreError::SlotConflict("slot taken".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "SLOT_CONFLICT");
    assert_eq!(json["error"], "slot taken");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("already reviewed".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn invalid_range_returns_400() {
    let err = AppError::Core(CoreError::InvalidRange("end before start".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_RANGE");
}

#[tokio::test]
async fn forbidden_and_unauthorized_keep_their_messages() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("not yours".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "not yours");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn validator_errors_map_to_validation_error() {
    #[derive(Validate)]
    struct Input {
        #[validate(range(min = 1, max = 5))]
        rating: i16,
    }

    let errors = Input { rating: 9 }.validate().unwrap_err();
    let (status, json) = error_to_response(AppError::from(errors)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("rating"));
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    for err in [
        AppError::InternalError("connection string leaked".into()),
        AppError::Core(CoreError::Internal("unknown status_id 9".into())),
    ] {
        let (status, json) = error_to_response(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
