mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use rstest::rstest;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn lists_submitters_sorted_by_name() {
    let app = TestApp::new().await;

    let response = app.get("/api/submitters").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(
        body,
        json!([
            "David Pitman",
            "Judah Jodrey",
            "Kaitlyn Arlotta",
            "Madelyn Ricepelekpo"
        ])
    );
}

#[tokio::test]
async fn registering_the_same_name_twice_conflicts() {
    let app = TestApp::new().await;

    let first = app
        .post_json("/api/register", json!({ "name": "  New Person  " }))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(
        response_json(first).await,
        json!({ "ok": true, "name": "New Person" })
    );

    let second = app
        .post_json("/api/register", json!({ "name": "New Person" }))
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = response_json(second).await;
    assert_eq!(body["error"], "Name already registered");
    assert_eq!(body["status"], 409);

    let names = response_json(app.get("/api/submitters").await).await;
    let count = names
        .as_array()
        .expect("names array")
        .iter()
        .filter(|name| *name == "New Person")
        .count();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn names_differing_only_in_case_are_distinct() {
    let app = TestApp::empty().await;

    let lower = app.post_json("/api/register", json!({ "name": "alice" })).await;
    let upper = app.post_json("/api/register", json!({ "name": "Alice" })).await;

    assert_eq!(lower.status(), StatusCode::CREATED);
    assert_eq!(upper.status(), StatusCode::CREATED);
}

#[rstest]
#[case(json!({ "name": "" }))]
#[case(json!({ "name": "   " }))]
#[case(json!({ "name": null }))]
#[case(json!({}))]
#[tokio::test]
async fn blank_names_are_rejected(#[case] payload: serde_json::Value) {
    let app = TestApp::new().await;

    let response = app.post_json("/api/register", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Name is required");
}

#[tokio::test]
async fn missing_body_is_treated_as_blank_name() {
    let app = TestApp::new().await;

    let response = app.request(Method::POST, "/api/register", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Name is required");
}

#[tokio::test]
async fn wrongly_typed_name_is_a_bad_request() {
    let app = TestApp::new().await;

    let response = app.post_json("/api/register", json!({ "name": 42 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/register")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .expect("request");
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn byte_order_mark_is_trimmed_from_registered_name() {
    let app = TestApp::empty().await;

    let response = app
        .post_json("/api/register", json!({ "name": "\u{feff}Padded Name " }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response_json(response).await["name"], "Padded Name");

    let names = response_json(app.get("/api/submitters").await).await;
    assert_eq!(names, json!(["Padded Name"]));
}
