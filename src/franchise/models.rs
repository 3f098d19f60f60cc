use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the franchises table
#[derive(Debug, Clone, FromRow)]
pub struct FranchiseModel {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

impl FranchiseModel {
    pub fn new(user_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
        }
    }
}
