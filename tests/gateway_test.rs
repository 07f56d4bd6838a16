mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use shareit::domain::FixedClock;
use shareit::gateway::{BackendClient, Gateway, gateway_router};
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{any, body_json, header as header_is, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(base_url: &str) -> Router {
    let client = BackendClient::new(base_url).expect("client");
    gateway_router(Gateway::with_clock(client, Arc::new(FixedClock(common::now()))))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn post_json(uri: &str, user: i64, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("X-Sharer-User-Id", user.to_string())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str, user: i64) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .header("X-Sharer-User-Id", user.to_string())
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_invalid_booking_never_reaches_backend() {
    let backend = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;

    let app = gateway_for(&backend.uri());

    let (status, body) = send(
        app.clone(),
        post_json(
            "/bookings",
            2,
            json!({"start": "2025-01-01T02:00:00", "end": "2025-01-01T01:00:00", "itemId": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInterval");

    let (status, body) = send(app.clone(), get("/bookings?state=LATER", 2)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UnknownBookingState");

    let (status, body) = send(
        app.clone(),
        post_json("/bookings", 2, json!({"start": "soon", "itemId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation");

    let (status, _) = send(app.clone(), get("/items?from=0&size=0", 2)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        app,
        Request::builder()
            .uri("/users")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Ann","email":"broken"}"#))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_valid_booking_is_forwarded_and_relayed() {
    let backend = MockServer::start().await;
    let reply = json!({
        "id": 7,
        "start": "2025-01-01T01:00:00",
        "end": "2025-01-01T02:00:00",
        "status": "WAITING",
        "booker": {"id": 2},
        "item": {"id": 1, "name": "Drill"}
    });

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(header_is("X-Sharer-User-Id", "2"))
        .and(body_json(json!({
            "start": "2025-01-01T01:00:00",
            "end": "2025-01-01T02:00:00",
            "itemId": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply.clone()))
        .expect(1)
        .mount(&backend)
        .await;

    let (status, body) = send(
        gateway_for(&backend.uri()),
        post_json(
            "/bookings",
            2,
            json!({"start": "2025-01-01T01:00", "end": "2025-01-01T02:00", "itemId": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, reply);
}

#[tokio::test]
async fn test_backend_errors_and_query_are_relayed_unchanged() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/owner"))
        .and(query_param("state", "past"))
        .and(query_param("from", "0"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "BookingNotFound",
            "message": "No bookings found for user 5 on page 0"
        })))
        .expect(1)
        .mount(&backend)
        .await;

    let (status, body) = send(
        gateway_for(&backend.uri()),
        get("/bookings/owner?state=past&from=0", 5),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "BookingNotFound");
}

#[tokio::test]
async fn test_unreachable_backend_is_bad_gateway() {
    // Nothing listens on the discard port
    let (status, body) = send(gateway_for("http://127.0.0.1:9"), get("/users/1", 1)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "BadGateway");
}

#[tokio::test]
async fn test_booking_starting_now_is_forwarded() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "InvalidInterval",
            "message": "start 2025-01-01 00:00:00 is in the past"
        })))
        .expect(1)
        .mount(&backend)
        .await;

    // The gateway's clock sits exactly at the start; the backend's later clock rejects it
    let (status, body) = send(
        gateway_for(&backend.uri()),
        post_json(
            "/bookings",
            2,
            json!({"start": "2025-01-01T00:00", "end": "2025-01-01T01:00", "itemId": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInterval");
}

