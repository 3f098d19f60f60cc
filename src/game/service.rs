use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::GameModel,
    repository::GameRepository,
    types::{GameCreateRequest, GameResponse},
};
use crate::shared::AppError;

/// Service for handling game-collection business logic
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
}

impl GameService {
    pub fn new(repository: Arc<dyn GameRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Adds a game to the user's collection
    #[instrument(skip(self, request))]
    pub async fn create_game(
        &self,
        user_id: &str,
        request: GameCreateRequest,
    ) -> Result<GameResponse, AppError> {
        if request.name.is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }

        let game = GameModel::new(
            user_id.to_string(),
            request.name,
            request.franchise_id,
        );
        debug!(game_id = %game.id, "Generated game id");

        self.repository.create_game(&game).await?;

        info!(game_id = %game.id, name = %game.name, "Game created successfully");
        Ok(GameResponse::from(game))
    }

    /// Lists the user's games
    #[instrument(skip(self))]
    pub async fn list_games(&self, user_id: &str) -> Result<Vec<GameResponse>, AppError> {
        let games = self.repository.list_games(user_id).await?;

        debug!(game_count = games.len(), "Games retrieved");
        Ok(games.into_iter().map(GameResponse::from).collect())
    }

    /// Fetches one game from the user's collection
    #[instrument(skip(self))]
    pub async fn get_game(&self, user_id: &str, game_id: &str) -> Result<GameResponse, AppError> {
        let game = self
            .repository
            .get_game(user_id, game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("game not found".to_string()))?;

        Ok(GameResponse::from(game))
    }

    /// Removes one game from the user's collection
    #[instrument(skip(self))]
    pub async fn delete_game(&self, user_id: &str, game_id: &str) -> Result<(), AppError> {
        let deleted = self.repository.delete_game(user_id, game_id).await?;
        if !deleted {
            return Err(AppError::NotFound("game not found".to_string()));
        }

        info!(game_id = %game_id, "Game deleted");
        Ok(())
    }
}
