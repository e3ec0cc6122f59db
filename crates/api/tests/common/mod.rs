#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use bookmyshoot_api::auth::jwt::{generate_access_token, JwtConfig};
use bookmyshoot_api::config::ServerConfig;
use bookmyshoot_api::router::build_app_router;
use bookmyshoot_api::state::AppState;
use bookmyshoot_db::models::photographer::CreatePhotographerProfile;
use bookmyshoot_db::models::user::CreateUser;
use bookmyshoot_db::repositories::{NotificationRepo, PhotographerRepo, UserRepo};
use bookmyshoot_events::{EventBus, NotificationWriter};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the production router over `pool`. Events are published to a bus
/// nobody listens to.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
    };
    build_app_router(state, &config)
}

/// Like [`build_test_app`], with a [`NotificationWriter`] consuming the bus.
pub fn build_test_app_with_notifications(pool: PgPool) -> Router {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    tokio::spawn(NotificationWriter::run(pool.clone(), event_bus.subscribe()));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

/// A seeded user with a valid access token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            full_name: email.to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed");
    TestUser {
        id: user.id,
        token: token_for(user.id, role),
    }
}

pub async fn seed_customer(pool: &PgPool, email: &str) -> TestUser {
    seed_user(pool, email, "customer").await
}

/// A photographer user with a profile row.
pub async fn seed_photographer(pool: &PgPool, email: &str) -> TestUser {
    let user = seed_user(pool, email, "photographer").await;
    PhotographerRepo::create(
        pool,
        &CreatePhotographerProfile {
            user_id: user.id,
            business_name: Some(format!("{email} studio")),
            city: Some("Mumbai".into()),
        },
    )
    .await
    .expect("profile creation should succeed");
    user
}

pub async fn seed_admin(pool: &PgPool, email: &str) -> TestUser {
    seed_user(pool, email, "admin").await
}

pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A valid booking request body for 2030-06-01 between the given UTC hours.
pub fn booking_body(photographer_id: i64, start_hour: u32, end_hour: u32) -> serde_json::Value {
    booking_body_on(photographer_id, 1, start_hour, end_hour)
}

pub fn booking_body_on(
    photographer_id: i64,
    day: u32,
    start_hour: u32,
    end_hour: u32,
) -> serde_json::Value {
    serde_json::json!({
        "photographer_id": photographer_id,
        "event_type": "wedding",
        "combo_type": "photo_plus_video",
        "location": {
            "city": "Mumbai",
            "sub_location": "Bandra",
            "coordinates": [19.06, 72.83],
        },
        "start_time": format!("2030-06-{day:02}T{start_hour:02}:00:00Z"),
        "end_time": format!("2030-06-{day:02}T{end_hour:02}:00:00Z"),
        "total_hours": f64::from(end_hour.saturating_sub(start_hour)).max(1.0),
        "total_amount": 5000.0,
        "special_requests": "Candid shots please",
    })
}

/// Create a booking through the API and return its id.
pub async fn create_booking(
    app: Router,
    customer: &TestUser,
    body: serde_json::Value,
) -> i64 {
    let response = post_json_auth(app, "/api/v1/bookings", &customer.token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Set a booking's status through the API, asserting success.
pub async fn set_status(app: Router, actor: &TestUser, booking_id: i64, status: &str) {
    let response = patch_json_auth(
        app,
        &format!("/api/v1/bookings/{booking_id}/status"),
        &actor.token,
        serde_json::json!({ "status": status }),
    )
    .await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::OK,
        "transition to {status} should succeed"
    );
}

/// Wait until the background writer has produced `expected` unread
/// notifications for `user_id`.
pub async fn wait_for_unread(pool: &PgPool, user_id: i64, expected: i64) -> i64 {
    let mut count = 0;
    for _ in 0..100 {
        count = NotificationRepo::unread_count(pool, user_id).await.unwrap();
        if count >= expected {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    count
}
