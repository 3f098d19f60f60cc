use serde::{Deserialize, Serialize};

use super::models::GameModel;

/// Request payload for adding a game to the caller's collection
#[derive(Debug, Deserialize, Default)]
pub struct GameCreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub franchise_id: Option<String>,
}

/// A game as returned to clients; the owning user is implied by the
/// authenticated request and never echoed
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GameResponse {
    pub id: String,
    pub name: String,
    pub franchise_id: Option<String>,
}

impl From<GameModel> for GameResponse {
    fn from(game: GameModel) -> Self {
        Self {
            id: game.id,
            name: game.name,
            franchise_id: game.franchise_id,
        }
    }
}
