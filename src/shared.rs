use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::auth::Authenticator;
use crate::franchise::repository::FranchiseRepository;
use crate::game::repository::GameRepository;
use crate::user::repository::UserRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub game_repository: Arc<dyn GameRepository + Send + Sync>,
    pub franchise_repository: Arc<dyn FranchiseRepository + Send + Sync>,
}

impl AppState {
    pub fn new(
        authenticator: Arc<Authenticator>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        franchise_repository: Arc<dyn FranchiseRepository + Send + Sync>,
    ) -> Self {
        Self {
            authenticator,
            user_repository,
            game_repository,
            franchise_repository,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Database(msg) => {
                // The detail goes to the log, never to the client
                error!(error = %msg, "request failed with database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Top-level recovery boundary: converts a panic anywhere in the request
/// pipeline into a classified 500 response instead of tearing down the
/// connection. Wired as `CatchPanicLayer::custom(handle_panic)`.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %detail, "request handler panicked");
    AppError::Internal.into_response()
}
