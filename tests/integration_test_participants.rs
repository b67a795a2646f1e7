mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{TestApp, ORGANIZER_ID};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &TestApp, event_id: &str, first: &str, last: &str, email: &str) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/events/{}/participants", event_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "firstName": first, "lastName": last, "email": email
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await
}

fn authed(builder: axum::http::request::Builder, user_id: &str, role: &str) -> axum::http::request::Builder {
    builder
        .header("x-user-id", user_id)
        .header("x-user-role", role)
}

#[tokio::test]
async fn test_list_pagination_newest_first() {
    let app = TestApp::new().await;
    let event = app.seed_event("published", None, false).await;

    register(&app, &event.id, "Alice", "Nguyen", "alice@x.com").await;
    register(&app, &event.id, "Bob", "Reyes", "bob@x.com").await;
    register(&app, &event.id, "Cara", "Okafor", "cara@x.com").await;

    let res = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/participants?page=1&limit=2", event.id)), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["totalPages"], 2);

    let participants = body["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    // Default ordering is registration date, newest first.
    assert_eq!(participants[0]["email"], "cara@x.com");
    assert_eq!(participants[1]["email"], "bob@x.com");

    let res2 = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/participants?page=2&limit=2", event.id)), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body2 = parse_body(res2).await;
    assert_eq!(body2["participants"].as_array().unwrap().len(), 1);
    assert_eq!(body2["participants"][0]["email"], "alice@x.com");
}

#[tokio::test]
async fn test_list_search_and_filters() {
    let app = TestApp::new().await;
    let event = app.seed_event("published", None, true).await;

    register(&app, &event.id, "Alice", "Nguyen", "alice@x.com").await;
    register(&app, &event.id, "Bob", "Reyes", "bob@other.org").await;

    // Case-insensitive substring over first name, last name, and email.
    let res = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/participants?search=REYES", event.id)), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["participants"][0]["email"], "bob@other.org");

    let res = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/participants?search=other.org", event.id)), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await["total"], 1);

    let res = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/participants?status=registered&checkedIn=false", event.id)), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await["total"], 2);

    let res = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/participants?checkedIn=true", event.id)), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await["total"], 0);
}

#[tokio::test]
async fn test_list_authorization() {
    let app = TestApp::new().await;
    let event = app.seed_event("published", None, false).await;

    // A different organizer is rejected.
    let res = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/participants", event.id)), "org-2", "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Admins can see any event.
    let res = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/participants", event.id)), "any-admin", "admin")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // No identity headers at all.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/participants", event.id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_participant_with_event_projection() {
    let app = TestApp::new().await;
    let event = app.seed_event("published", None, false).await;
    let created = register(&app, &event.id, "Alice", "Nguyen", "alice@x.com").await;
    let id = created["participant"]["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/participants/{}", id)), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["participant"]["email"], "alice@x.com");
    assert_eq!(body["participant"]["event"]["id"], event.id);
    assert_eq!(body["participant"]["event"]["name"], "Rust Meetup");
    assert_eq!(body["participant"]["event"]["venue"], "Hall A");
    // Restricted projection: no counters or organizer leak through.
    assert!(body["participant"]["event"]["totalRegistrations"].is_null());
    assert!(body["participant"]["event"]["organizerId"].is_null());

    let missing = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri("/api/v1/participants/nope"), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let forbidden = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/participants/{}", id)), "org-2", "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_respects_allow_list() {
    let app = TestApp::new().await;
    let event = app.seed_event("published", None, true).await;
    let created = register(&app, &event.id, "Alice", "Nguyen", "alice@x.com").await;
    let id = created["participant"]["id"].as_str().unwrap();
    let original_ticket = created["participant"]["ticketNumber"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        authed(Request::builder().method("PATCH")
            .uri(format!("/api/v1/participants/{}", id)), ORGANIZER_ID, "organizer")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "firstName": "Alicia",
                "status": "confirmed",
                "ticketNumber": "TKT-HACKED00",
                "checkedIn": true
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["participant"]["firstName"], "Alicia");
    assert_eq!(body["participant"]["status"], "confirmed");
    // Protected fields are silently ignored.
    assert_eq!(body["participant"]["ticketNumber"], original_ticket);
    assert_eq!(body["participant"]["checkedIn"], false);
}

#[tokio::test]
async fn test_delete_decrements_registrations() {
    let app = TestApp::new().await;
    let event = app.seed_event("published", None, false).await;
    let created = register(&app, &event.id, "Alice", "Nguyen", "alice@x.com").await;
    let id = created["participant"]["id"].as_str().unwrap();

    let (registrations, _) = app.event_counters(&event.id).await;
    assert_eq!(registrations, 1);

    let res = app.router.clone().oneshot(
        authed(Request::builder().method("DELETE")
            .uri(format!("/api/v1/participants/{}", id)), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (registrations, _) = app.event_counters(&event.id).await;
    assert_eq!(registrations, 0);

    let get_res = app.router.clone().oneshot(
        authed(Request::builder().method("GET")
            .uri(format!("/api/v1/participants/{}", id)), ORGANIZER_ID, "organizer")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(get_res.status(), StatusCode::NOT_FOUND);
}
