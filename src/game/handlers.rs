use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::{
    service::GameService,
    types::{GameCreateRequest, GameResponse},
};
use crate::shared::{AppError, AppState};
use crate::user::models::UserModel;

/// HTTP handler for adding a game to the collection
///
/// POST /games
/// The owner is always the authenticated user attached by the middleware,
/// never anything in the request body
#[instrument(name = "create_game", skip(state, user, request))]
pub async fn create_game(
    State(state): State<AppState>,
    Extension(user): Extension<UserModel>,
    Json(request): Json<GameCreateRequest>,
) -> Result<Json<GameResponse>, AppError> {
    let service = GameService::new(Arc::clone(&state.game_repository));
    let game = service.create_game(&user.id, request).await?;

    Ok(Json(game))
}

/// HTTP handler for listing the authenticated user's games
///
/// GET /games
#[instrument(name = "list_games", skip(state, user))]
pub async fn list_games(
    State(state): State<AppState>,
    Extension(user): Extension<UserModel>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let service = GameService::new(Arc::clone(&state.game_repository));
    let games = service.list_games(&user.id).await?;

    Ok(Json(games))
}

/// HTTP handler for fetching one game
///
/// GET /games/:id
#[instrument(name = "get_game", skip(state, user))]
pub async fn get_game(
    State(state): State<AppState>,
    Extension(user): Extension<UserModel>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, AppError> {
    let service = GameService::new(Arc::clone(&state.game_repository));
    let game = service.get_game(&user.id, &game_id).await?;

    Ok(Json(game))
}

/// HTTP handler for removing one game
///
/// DELETE /games/:id
#[instrument(name = "delete_game", skip(state, user))]
pub async fn delete_game(
    State(state): State<AppState>,
    Extension(user): Extension<UserModel>,
    Path(game_id): Path<String>,
) -> Result<(), AppError> {
    let service = GameService::new(Arc::clone(&state.game_repository));
    service.delete_game(&user.id, &game_id).await?;

    Ok(())
}
