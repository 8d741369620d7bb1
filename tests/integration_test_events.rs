mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_event_starts_with_zero_bookings() {
    let app = TestApp::new().await;

    let event = app.seed_event("Chess Open", "Chess Club", 1, 20).await;

    assert_eq!(event.name, "Chess Open");
    assert_eq!(event.club_name, "Chess Club");
    assert_eq!(event.slot, 1);
    assert_eq!(event.capacity, 20);
    assert_eq!(event.booked_count, 0);
    assert!(!event.id.is_empty());
}

#[tokio::test]
async fn test_create_event_rejects_invalid_slot_and_capacity() {
    let app = TestApp::new().await;

    for (slot, capacity) in [(0, 10), (5, 10), (1, 0), (2, -3)] {
        let payload = json!({
            "name": "Bad Event",
            "venue": "Hall",
            "club_name": "Club",
            "slot": slot,
            "capacity": capacity
        });

        let response = app.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "slot={} capacity={}", slot, capacity);
        let body = parse_body(response).await;
        assert_eq!(body["kind"], "VALIDATION");
    }
}

#[tokio::test]
async fn test_list_events_with_club_filter() {
    let app = TestApp::new().await;

    app.seed_event("Chess Open", "Chess Club", 1, 20).await;
    app.seed_event("Chess Blitz", "Chess Club", 2, 20).await;
    app.seed_event("Robot Demo", "Robotics Club", 3, 20).await;

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/events")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let all = parse_body(response).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/events?club=Chess%20Club")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let filtered = parse_body(response).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|e| e["club_name"] == "Chess Club"));
}

#[tokio::test]
async fn test_get_missing_event_is_404() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/events/no-such-event")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_body(response).await;
    assert_eq!(body["kind"], "EVENT_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_event() {
    let app = TestApp::new().await;
    let event = app.seed_event("Chess Open", "Chess Club", 1, 20).await;

    let response = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/events/{}", event.id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/events/{}", event.id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting twice reports not-found.
    let response = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/events/{}", event.id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
