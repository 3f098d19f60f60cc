use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use gamelog::user::AUTH_TOKEN_HEADER;
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

// ============================================================================
// Request Actions
// ============================================================================

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTH_TOKEN_HEADER, token);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_empty(app: &Router, method: &str, uri: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTH_TOKEN_HEADER, token);
    }
    let request = builder.body(Body::empty()).unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Creates a user and asserts success
pub async fn create_user(app: &Router, username: &str, email: &str, password: &str) -> Value {
    let response = send_json(
        app,
        "POST",
        "/users",
        None,
        json!({"username": username, "email": email, "password": password}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    body_json(response).await
}

/// Logs a user in and returns the issued token
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send_json(
        app,
        "POST",
        "/users/login",
        None,
        json!({"email": email, "password": password}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

/// Creates a game for the authenticated user and asserts success
pub async fn create_game(app: &Router, token: &str, name: &str) -> Value {
    let response = send_json(app, "POST", "/games", Some(token), json!({"name": name})).await;
    assert_eq!(response.status(), StatusCode::OK);

    body_json(response).await
}
