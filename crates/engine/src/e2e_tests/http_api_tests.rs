//! REST API tests driven through the router without a socket.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;
use crate::api;

fn router(economy: &TestEconomy) -> Router {
    api::http::routes().with_state(economy.app.clone())
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

#[tokio::test]
async fn health_responds_ok() {
    let economy = TestEconomy::with_scores(vec![]).await;
    let (status, body) = send(&router(&economy), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn adventure_endpoint_enforces_daily_limit() {
    let economy = TestEconomy::with_scores(vec![4]).await;
    let router = router(&economy);

    let (status, user) = send(
        &router,
        Method::POST,
        "/api/users",
        Some(json!({ "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["current_threshold"], 500);
    let user_id = user["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/adventure",
        Some(json!({ "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Adventure complete");
    assert_eq!(body["material"], "Legendary");

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/adventure",
        Some(json!({ "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("You can only go on one adventure per day"));

    economy.clock.advance(Duration::hours(24));
    let (status, _) = send(
        &router,
        Method::POST,
        "/api/adventure",
        Some(json!({ "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/adventure_history?user_id={}", user_id);
    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adventure_history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let economy = TestEconomy::with_scores(vec![]).await;
    let router = router(&economy);
    let stranger = uuid::Uuid::new_v4();

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/adventure",
        Some(json!({ "user_id": stranger })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/api/materials_summary?user_id={}", stranger);
    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn read_endpoints_require_user_id() {
    let economy = TestEconomy::with_scores(vec![]).await;
    let router = router(&economy);

    for uri in ["/api/materials_summary", "/api/adventure_history?user_id="] {
        let (status, body) = send(&router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["message"], "User ID is required");
    }

    let (status, _) = send(
        &router,
        Method::GET,
        "/api/materials_summary?user_id=not-a-uuid",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn forge_endpoint_reports_rarity_and_prize() {
    let economy = TestEconomy::with_scores(vec![]).await;
    let router = router(&economy);
    let user = economy.register("forger").await;
    let ids: Vec<String> = economy
        .seed_materials(user.id(), &[150, 160, 170, 174, 174])
        .await
        .iter()
        .map(|a| a.id().to_string())
        .collect();

    let (status, created) = send(
        &router,
        Method::POST,
        "/api/prize_types",
        Some(json!({ "name": "Sticker", "rarity": "Common", "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["remaining"], 2);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/forge_lootbox",
        Some(json!({ "user_id": user.id().to_string(), "material_ids": &ids[..4] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Exactly 5 materials"));

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/forge_lootbox",
        Some(json!({ "user_id": user.id().to_string(), "material_ids": ids })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "New LootBox created");
    assert_eq!(body["rarity"], "Common");
    assert_eq!(body["prize"]["name"], "Sticker");

    let uri = format!("/api/materials_summary?user_id={}", user.id());
    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["used_materials_summary"]["Common"], 5);
    assert_eq!(body["unused_materials_summary"], json!({}));

    let (status, catalog) = send(&router, Method::GET, "/api/prize_types", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(catalog[0]["number_claimed"], 1);
    assert_eq!(catalog[0]["remaining"], 1);
}

#[tokio::test]
async fn management_validation_errors() {
    let economy = TestEconomy::with_scores(vec![]).await;
    let router = router(&economy);

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/users",
        Some(json!({ "username": "dup" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/users",
        Some(json!({ "username": "dup" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/users",
        Some(json!({ "username": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/prize_types",
        Some(json!({ "name": "", "rarity": "Rare", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let economy = TestEconomy::with_scores(vec![]).await;
    let router = router(&economy);
    let user = economy.register("sloppy").await;

    let cases = [
        ("/api/adventure", json!({ "user_id": "42" })),
        (
            "/api/forge_lootbox",
            json!({ "user_id": user.id().to_string(), "material_ids": [1, 2, 3, 4, 5] }),
        ),
        (
            "/api/forge_lootbox",
            json!({ "user_id": user.id().to_string() }),
        ),
        ("/api/users", json!({})),
        (
            "/api/prize_types",
            json!({ "name": "Gem", "rarity": "Mythic", "quantity": 1 }),
        ),
    ];
    for (uri, body) in cases {
        let (status, response) = send(&router, Method::POST, uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(response["message"].is_string(), "{}: {}", uri, response);
    }
}
