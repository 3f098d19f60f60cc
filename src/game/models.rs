use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the games table. Rows are always scoped to the user
/// who created them.
#[derive(Debug, Clone, FromRow)]
pub struct GameModel {
    pub id: String, // UUID v4, assigned on creation
    pub user_id: String,
    pub name: String,
    pub franchise_id: Option<String>, // Optional link to a franchise
}

impl GameModel {
    /// Creates a new game model with a generated id
    pub fn new(user_id: String, name: String, franchise_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
            franchise_id,
        }
    }
}
