// Library crate for the gamelog server
// This file exposes the public API for integration tests

pub mod auth;
pub mod franchise;
pub mod game;
pub mod shared;
pub mod user;
pub mod web;

// Re-export commonly used types for easier access in tests
pub use auth::{Authenticator, TokenError};
pub use shared::{AppError, AppState};

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// Builds the full application router over the given state.
///
/// Two surfaces share the state: the JSON API gates protected routes on
/// the x-auth-token header with full validation, while the browser pages
/// gate on cookie presence only and redirect to the login page.
pub fn build_router(state: AppState) -> Router {
    let api_protected = Router::new()
        .route("/users", get(user::handlers::current_user))
        .route(
            "/games",
            post(game::handlers::create_game).get(game::handlers::list_games),
        )
        .route(
            "/games/:id",
            get(game::handlers::get_game).delete(game::handlers::delete_game),
        )
        .route(
            "/franchises",
            post(franchise::handlers::create_franchise).get(franchise::handlers::list_franchises),
        )
        .layer(from_fn_with_state(state.clone(), user::require_token));

    // Create, login and logout stay outside the association-checking gate:
    // the first two have no token yet, logout must stay idempotent
    let api_public = Router::new()
        .route("/users", post(user::handlers::create_user))
        .route("/users/login", post(user::handlers::login))
        .route("/users/logout", post(user::handlers::logout));

    let web_protected = Router::new()
        .route("/", get(web::handlers::home))
        .layer(from_fn(web::require_login));

    let web_public = Router::new()
        .route(
            "/signup",
            get(web::handlers::signup_page).post(web::handlers::signup_submit),
        )
        .route(
            "/login",
            get(web::handlers::login_page).post(web::handlers::login_submit),
        )
        .route("/logout", get(web::handlers::logout));

    Router::new()
        .merge(api_protected)
        .merge(api_public)
        .merge(web_protected)
        .merge(web_public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(shared::handle_panic))
        .with_state(state)
}
