use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::GameModel;
use crate::shared::AppError;

/// Trait for game repository operations. Every operation is scoped to the
/// owning user; a game belonging to someone else behaves as absent.
#[async_trait]
pub trait GameRepository {
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError>;
    async fn get_game(&self, user_id: &str, game_id: &str) -> Result<Option<GameModel>, AppError>;
    async fn list_games(&self, user_id: &str) -> Result<Vec<GameModel>, AppError>;
    async fn delete_game(&self, user_id: &str, game_id: &str) -> Result<bool, AppError>;
}

/// In-memory implementation of GameRepository for development and testing
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<String, GameModel>>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError> {
        debug!(game_id = %game.id, name = %game.name, "Creating game in memory");

        let mut games = self.games.lock().unwrap();
        games.insert(game.id.clone(), game.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(&self, user_id: &str, game_id: &str) -> Result<Option<GameModel>, AppError> {
        let games = self.games.lock().unwrap();
        Ok(games
            .get(game_id)
            .filter(|g| g.user_id == user_id)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn list_games(&self, user_id: &str) -> Result<Vec<GameModel>, AppError> {
        let games = self.games.lock().unwrap();
        Ok(games
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, user_id: &str, game_id: &str) -> Result<bool, AppError> {
        let mut games = self.games.lock().unwrap();
        match games.get(game_id) {
            Some(game) if game.user_id == user_id => {
                games.remove(game_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// PostgreSQL implementation of the game repository
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn game_from_row(row: &sqlx::postgres::PgRow) -> GameModel {
        GameModel {
            id: row.get("id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            franchise_id: row.get("franchise_id"),
        }
    }
}

#[async_trait]
impl GameRepository for PostgresGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError> {
        debug!(game_id = %game.id, name = %game.name, "Creating game in database");

        sqlx::query(
            "INSERT INTO games (id, user_id, name, franchise_id) VALUES ($1, $2, $3, $4)",
        )
        .bind(&game.id)
        .bind(&game.user_id)
        .bind(&game.name)
        .bind(&game.franchise_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create game in database");
            AppError::Database(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(&self, user_id: &str, game_id: &str) -> Result<Option<GameModel>, AppError> {
        let row = sqlx::query(
            "SELECT id, user_id, name, franchise_id FROM games WHERE id = $1 AND user_id = $2",
        )
        .bind(game_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch game from database");
            AppError::Database(e.to_string())
        })?;

        Ok(row.map(|r| Self::game_from_row(&r)))
    }

    #[instrument(skip(self))]
    async fn list_games(&self, user_id: &str) -> Result<Vec<GameModel>, AppError> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, franchise_id FROM games WHERE user_id = $1 ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list games from database");
            AppError::Database(e.to_string())
        })?;

        Ok(rows.iter().map(Self::game_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, user_id: &str, game_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1 AND user_id = $2")
            .bind(game_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete game from database");
                AppError::Database(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
