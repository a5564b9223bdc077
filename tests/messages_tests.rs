use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

mod common;

use common::TempDb;

async fn spawn_app() -> (TempDb, Router) {
    let db = TempDb::new("cinepair-messages-test");
    let state = cinepair::api::create_app_state_from_config(db.config(), None)
        .await
        .expect("Failed to create app state");
    cinepair::services::seed_sample_movies(state.store())
        .await
        .expect("Failed to seed movies");

    (db, cinepair::api::router(state))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    api_key: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Api-Key", api_key);

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

struct Member {
    id: i64,
    key: String,
}

async fn register(app: &Router, name: &str) -> Member {
    let payload = json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "password": "correct-horse",
    });
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    Member {
        id: body["user"]["id"].as_i64().unwrap(),
        key: body["apiKey"].as_str().unwrap().to_string(),
    }
}

async fn post_message(app: &Router, from: &Member, body: Value) -> (StatusCode, Value) {
    send(app, "POST", "/api/messages", &from.key, Some(body)).await
}

fn contents(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_send_returns_enriched_message() {
    let (_db, app) = spawn_app().await;
    let alice = register(&app, "Alice").await;
    let bob = register(&app, "Bob").await;

    let (status, body) = post_message(
        &app,
        &alice,
        json!({ "content": "  movie night?  ", "receiverId": bob.id, "movieId": 5 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "movie night?");
    assert_eq!(body["senderId"], alice.id);
    assert_eq!(body["receiverId"], bob.id);
    assert_eq!(body["sender"]["name"], "Alice");
    assert_eq!(body["receiver"]["name"], "Bob");
    assert_eq!(body["movie"]["title"], "Inception");
    assert!(body["createdAt"].is_string());

    let (_, body) = post_message(&app, &bob, json!({ "content": "sure", "receiverId": alice.id })).await;
    assert!(body["movie"].is_null());
    assert!(body["movieId"].is_null());
}

#[tokio::test]
async fn test_invalid_sends_create_nothing() {
    let (_db, app) = spawn_app().await;
    let alice = register(&app, "Alice").await;
    let bob = register(&app, "Bob").await;

    let cases = [
        (json!({ "content": "   ", "receiverId": bob.id }), StatusCode::BAD_REQUEST),
        (json!({ "receiverId": bob.id }), StatusCode::BAD_REQUEST),
        (json!({ "content": "hi" }), StatusCode::BAD_REQUEST),
        (json!({ "content": "hi", "receiverId": 0 }), StatusCode::BAD_REQUEST),
        (json!({ "content": "hi", "receiverId": alice.id }), StatusCode::BAD_REQUEST),
        (json!({ "content": "hi", "receiverId": 999 }), StatusCode::NOT_FOUND),
        (
            json!({ "content": "hi", "receiverId": bob.id, "movieId": 999 }),
            StatusCode::NOT_FOUND,
        ),
    ];

    for (payload, expected) in cases {
        let (status, body) = post_message(&app, &alice, payload.clone()).await;
        assert_eq!(status, expected, "{payload}");
        assert!(body["error"].is_string());
    }

    let (_, feed) = send(&app, "GET", "/api/messages", &alice.key, None).await;
    assert!(feed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_feed_scope_and_filters() {
    let (_db, app) = spawn_app().await;
    let alice = register(&app, "Alice").await;
    let bob = register(&app, "Bob").await;
    let carol = register(&app, "Carol").await;

    post_message(&app, &alice, json!({ "content": "a->b", "receiverId": bob.id, "movieId": 1 })).await;
    post_message(&app, &bob, json!({ "content": "b->a", "receiverId": alice.id })).await;
    post_message(&app, &carol, json!({ "content": "c->b", "receiverId": bob.id, "movieId": 1 })).await;
    post_message(&app, &carol, json!({ "content": "c->a", "receiverId": alice.id })).await;

    let (status, feed) = send(&app, "GET", "/api/messages", &alice.key, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contents(&feed), vec!["a->b", "b->a", "c->a"]);

    let (_, feed) = send(&app, "GET", "/api/messages", &bob.key, None).await;
    assert_eq!(contents(&feed), vec!["a->b", "b->a", "c->b"]);

    let uri = format!("/api/messages?with={}", bob.id);
    let (_, feed) = send(&app, "GET", &uri, &alice.key, None).await;
    assert_eq!(contents(&feed), vec!["a->b", "b->a"]);

    let (_, feed) = send(&app, "GET", "/api/messages?movieId=1", &alice.key, None).await;
    assert_eq!(contents(&feed), vec!["a->b"]);

    // Carol's conversation with Bob is private to them.
    let uri = format!("/api/messages?with={}", carol.id);
    let (_, feed) = send(&app, "GET", &uri, &bob.key, None).await;
    assert_eq!(contents(&feed), vec!["c->b"]);

    let (_, feed) = send(&app, "GET", "/api/messages?with=abc&movieId=", &alice.key, None).await;
    assert_eq!(feed.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_polling_with_after_cursor() {
    let (_db, app) = spawn_app().await;
    let alice = register(&app, "Alice").await;
    let bob = register(&app, "Bob").await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let (_, body) = post_message(
            &app,
            &alice,
            json!({ "content": format!("m{i}"), "receiverId": bob.id }),
        )
        .await;
        ids.push(body["id"].as_i64().unwrap());
    }

    let uri = format!("/api/messages?after={}", ids[2]);
    let (_, feed) = send(&app, "GET", &uri, &bob.key, None).await;
    assert_eq!(contents(&feed), vec!["m3", "m4"]);

    let uri = format!("/api/messages?after={}", ids[4]);
    let (_, feed) = send(&app, "GET", &uri, &bob.key, None).await;
    assert!(feed.as_array().unwrap().is_empty());

    let (_, feed) = send(&app, "GET", "/api/messages?limit=2", &bob.key, None).await;
    assert_eq!(contents(&feed), vec!["m0", "m1"]);

    // Paging with the cursor visits every message exactly once.
    let mut seen = Vec::new();
    let mut cursor = 0;
    loop {
        let uri = format!("/api/messages?limit=2&after={cursor}");
        let (_, feed) = send(&app, "GET", &uri, &bob.key, None).await;
        let page = feed.as_array().unwrap();
        if page.is_empty() {
            break;
        }
        for message in page {
            seen.push(message["id"].as_i64().unwrap());
        }
        cursor = seen.last().copied().unwrap();
    }
    assert_eq!(seen, ids);
}
