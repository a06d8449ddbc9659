//! Public catalog listings and the guarded worksheet collection.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use cyphertech::{models::Collection, routes::build_router, test_utils::test_helpers};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router to respond");
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body to be readable");
    let body = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, body)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

#[tokio::test]
async fn test_liveness_route() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = build_router(test_helpers::create_test_state(pool));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body_bytes[..], b"Cypher Tech is On...");
}

#[tokio::test]
async fn test_services_and_testimonials_are_public() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::create_test_state(pool);
    state
        .document_service
        .insert(
            Collection::Services,
            object(json!({ "title": "Web Development", "price": 500 })),
        )
        .await
        .unwrap();
    state
        .document_service
        .insert(
            Collection::Testimonials,
            object(json!({ "name": "Dana", "review": "Great team" })),
        )
        .await
        .unwrap();
    let app = build_router(state);

    let (status, body) = send(
        app.clone(),
        Request::builder().uri("/services").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Web Development");
    assert!(body[0]["_id"].is_string());

    let (status, body) = send(
        app,
        Request::builder()
            .uri("/testimonials")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["review"], "Great team");
}

#[tokio::test]
async fn test_worksheet_post_then_list() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::create_test_state(pool);
    let bearer = test_helpers::bearer_for(&state, "staff@example.com");
    let app = build_router(state);

    let sheet = json!({
        "email": "staff@example.com",
        "task": "Sales",
        "hours": 6,
        "date": "2024-01-15"
    });
    let (status, body) = send(
        app.clone(),
        Request::builder()
            .method(Method::POST)
            .uri("/work-sheet")
            .header(header::AUTHORIZATION, &bearer)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(sheet.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let inserted_id = body["insertedId"].as_str().unwrap().to_string();

    let (status, body) = send(
        app,
        Request::builder()
            .uri("/work-sheet")
            .header(header::AUTHORIZATION, &bearer)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["_id"], inserted_id.as_str());
    assert_eq!(body[0]["task"], "Sales");
    assert_eq!(body[0]["hours"], 6);
}

#[tokio::test]
async fn test_worksheet_post_requires_token() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::create_test_state(pool);
    let app = build_router(state.clone());

    let (status, _) = send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri("/work-sheet")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "task": "Sales" }).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let sheets = state
        .document_service
        .list(Collection::Worksheets)
        .await
        .unwrap();
    assert!(sheets.is_empty());
}
