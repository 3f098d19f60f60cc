mod utils;

use axum::http::StatusCode;
use serde_json::json;

use utils::actions::{body_json, create_game, create_user, login, send_empty, send_json};
use utils::setup::test_app;

/// Creates a user, logs in, then creates two games and fetches them back.
#[tokio::test]
async fn test_create_and_get_all_games() {
    let test_app = test_app();
    let app = &test_app.app;

    create_user(app, "games", "games@test.com", "password").await;
    let token = login(app, "games@test.com", "password").await;

    let batman = create_game(app, &token, "Batman").await;
    let ac = create_game(app, &token, "AC").await;

    assert!(!batman["id"].as_str().unwrap().is_empty());
    assert!(batman["franchise_id"].is_null());
    assert_eq!(batman["name"], "Batman");

    let response = send_empty(app, "GET", "/games", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let games = body_json(response).await;
    let games = games.as_array().unwrap();
    assert_eq!(games.len(), 2);
    assert!(games.contains(&batman));
    assert!(games.contains(&ac));
}

#[tokio::test]
async fn test_games_are_scoped_per_user() {
    let test_app = test_app();
    let app = &test_app.app;

    create_user(app, "alice", "alice@test.com", "password").await;
    create_user(app, "bob", "bob@test.com", "password").await;
    let alice_token = login(app, "alice@test.com", "password").await;
    let bob_token = login(app, "bob@test.com", "password").await;

    create_game(app, &alice_token, "Batman").await;

    // Bob sees none of Alice's games
    let response = send_empty(app, "GET", "/games", Some(&bob_token)).await;
    let games = body_json(response).await;
    assert!(games.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_game_create_requires_name() {
    let test_app = test_app();
    let app = &test_app.app;

    create_user(app, "games", "games@test.com", "password").await;
    let token = login(app, "games@test.com", "password").await;

    let response = send_json(app, "POST", "/games", Some(&token), json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_collection_routes_require_auth() {
    let test_app = test_app();
    let app = &test_app.app;

    for (method, uri) in [
        ("GET", "/games"),
        ("POST", "/games"),
        ("GET", "/franchises"),
        ("POST", "/franchises"),
    ] {
        let response = send_empty(app, method, uri, None).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should be gated",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_game_linked_to_franchise() {
    let test_app = test_app();
    let app = &test_app.app;

    create_user(app, "games", "games@test.com", "password").await;
    let token = login(app, "games@test.com", "password").await;

    let response = send_json(
        app,
        "POST",
        "/franchises",
        Some(&token),
        json!({"name": "Batman"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let franchise = body_json(response).await;
    let franchise_id = franchise["id"].as_str().unwrap();

    let response = send_json(
        app,
        "POST",
        "/games",
        Some(&token),
        json!({"name": "Arkham City", "franchise_id": franchise_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let game = body_json(response).await;
    assert_eq!(game["franchise_id"], franchise_id);

    // The link survives a round trip through the store
    let response = send_empty(
        app,
        "GET",
        &format!("/games/{}", game["id"].as_str().unwrap()),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["franchise_id"], franchise_id);
}

#[tokio::test]
async fn test_deleted_game_disappears_from_listing() {
    let test_app = test_app();
    let app = &test_app.app;

    create_user(app, "games", "games@test.com", "password").await;
    let token = login(app, "games@test.com", "password").await;

    let game = create_game(app, &token, "Batman").await;
    let game_id = game["id"].as_str().unwrap();

    let response = send_empty(app, "DELETE", &format!("/games/{}", game_id), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_empty(app, "GET", &format!("/games/{}", game_id), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send_empty(app, "GET", "/games", Some(&token)).await;
    let games = body_json(response).await;
    assert!(games.as_array().unwrap().is_empty());
}
