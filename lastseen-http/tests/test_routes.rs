use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use lastseen_core::{
    activity::{ActivityError, ActivityResult, ActivityStorage, UserActivity, UsersActivity},
    activity_storage_impl::FileStorage,
};
use lastseen_http::{routes, AppContext};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

fn file_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(&dir.path().join("user_data.json")).unwrap();
    let app = routes::register_routes(AppContext::new(storage));
    (dir, app)
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

fn post_ping(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/user-ping")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_users() -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri("/api/users")
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ping_then_list() {
    let (_dir, app) = file_app();
    let before = Utc::now();

    let response = send(&app, post_ping(json!({"userId": "u1", "platform": "ios"}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    dbg!(&body);
    assert_eq!(body["message"], "User activity logged");
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["platform"], "ios");

    let response = send(&app, get_users()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    dbg!(&body);

    let users = body.as_object().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(body["u1"]["platform"], "ios");
    let last_seen = DateTime::parse_from_rfc3339(body["u1"]["lastSeen"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc);
    // stored with millisecond precision
    assert!(last_seen >= before - chrono::Duration::milliseconds(1));
    assert!(last_seen <= Utc::now());
}

#[tokio::test]
async fn test_ping_without_platform_is_unknown() {
    let (_dir, app) = file_app();

    let response = send(&app, post_ping(json!({"userId": "u1"}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(send(&app, get_users()).await).await;
    assert_eq!(body["u1"]["platform"], "unknown");
}

#[tokio::test]
async fn test_ping_same_user_keeps_one_record() {
    let (_dir, app) = file_app();

    send(&app, post_ping(json!({"userId": "u1", "platform": "ios"}))).await;
    let first = json_body(send(&app, get_users()).await).await;

    send(&app, post_ping(json!({"userId": "u1", "platform": "web"}))).await;
    let second = json_body(send(&app, get_users()).await).await;

    assert_eq!(second.as_object().unwrap().len(), 1);
    assert_eq!(second["u1"]["platform"], "web");
    assert!(second["u1"]["lastSeen"].as_str().unwrap() >= first["u1"]["lastSeen"].as_str().unwrap());
}

#[tokio::test]
async fn test_ping_without_user_id() {
    let (_dir, app) = file_app();
    send(&app, post_ping(json!({"userId": "u1", "platform": "ios"}))).await;
    let before = json_body(send(&app, get_users()).await).await;

    for body in [json!({"platform": "ios"}), json!({"userId": ""}), json!({"userId": null})] {
        let response = send(&app, post_ping(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body, json!({"error": "userId is required"}));
    }

    let after = json_body(send(&app, get_users()).await).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_ping_malformed_body() {
    let (_dir, app) = file_app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/user-ping")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&app, req).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/user-ping")
        .body(Body::from(r#"{"userId": "u1"}"#))
        .unwrap();
    let response = send(&app, req).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(send(&app, get_users()).await).await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_list_empty() {
    let (_dir, app) = file_app();

    let response = send(&app, get_users()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({}));
}

#[tokio::test]
async fn test_liveness_and_headers() {
    let (_dir, app) = file_app();

    let req = Request::builder()
        .uri("/ping")
        .header("x-request-id", "req-1")
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, req).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["x-request-id"], "req-1");
    assert!(headers.contains_key("x-correlation-id"));
    assert!(headers["server-timing"]
        .to_str()
        .unwrap()
        .starts_with("lastseen;dur="));
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (_dir, app) = file_app();

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/user-ping")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, req).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[derive(Clone)]
struct BrokenStorage;

#[async_trait]
impl ActivityStorage for BrokenStorage {
    async fn upsert(&self, _record: &UserActivity) -> ActivityResult<UserActivity> {
        Err(ActivityError::internal_error("disk on fire at /var/data"))
    }

    async fn get_all(&self) -> ActivityResult<UsersActivity> {
        Err(ActivityError::internal_error("disk on fire at /var/data"))
    }

    async fn close(&self) -> ActivityResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_storage_failure_is_500_without_detail() {
    let app = routes::register_routes(AppContext::new(BrokenStorage));

    let response = send(&app, post_ping(json!({"userId": "u1"}))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Internal server error"})
    );

    let response = send(&app, get_users()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Internal server error"})
    );
}
