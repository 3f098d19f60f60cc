use axum::{extract::State, http::HeaderMap, Extension, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    middleware::AUTH_TOKEN_HEADER,
    models::UserModel,
    service::UserService,
    types::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new account
///
/// POST /users
/// Returns the persisted user with its assigned id; the password is never
/// echoed back
#[instrument(name = "create_user", skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let service = UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.authenticator),
    );
    let user = service.register(request).await?;

    info!(user_id = %user.id, "User created successfully");

    Ok(Json(user))
}

/// HTTP handler for logging in
///
/// POST /users/login
/// Returns the issued token in the response body
#[instrument(name = "login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.authenticator),
    );
    let response = service.login(request).await?;

    Ok(Json(response))
}

/// HTTP handler returning the authenticated user
///
/// GET /users, gated by [`super::require_token`]; the middleware already
/// resolved the token, this handler only serializes the attached user.
#[instrument(name = "current_user", skip(user))]
pub async fn current_user(Extension(user): Extension<UserModel>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// HTTP handler for logging out
///
/// POST /users/logout with the x-auth-token header. Deliberately not
/// behind the association-checking middleware: logout is idempotent, and a
/// token whose association is already gone must still log out cleanly.
#[instrument(name = "logout", skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(), AppError> {
    let token = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing auth token".to_string()))?;

    let service = UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.authenticator),
    );
    service.logout(token).await?;

    Ok(())
}
