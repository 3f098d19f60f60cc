use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::FranchiseModel;
use crate::shared::AppError;

/// Trait for franchise repository operations, scoped to the owning user
#[async_trait]
pub trait FranchiseRepository {
    async fn create_franchise(&self, franchise: &FranchiseModel) -> Result<(), AppError>;
    async fn list_franchises(&self, user_id: &str) -> Result<Vec<FranchiseModel>, AppError>;
}

/// In-memory implementation of FranchiseRepository for development and testing
pub struct InMemoryFranchiseRepository {
    franchises: Mutex<HashMap<String, FranchiseModel>>,
}

impl Default for InMemoryFranchiseRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFranchiseRepository {
    pub fn new() -> Self {
        Self {
            franchises: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl FranchiseRepository for InMemoryFranchiseRepository {
    #[instrument(skip(self, franchise))]
    async fn create_franchise(&self, franchise: &FranchiseModel) -> Result<(), AppError> {
        debug!(franchise_id = %franchise.id, name = %franchise.name, "Creating franchise in memory");

        let mut franchises = self.franchises.lock().unwrap();
        franchises.insert(franchise.id.clone(), franchise.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_franchises(&self, user_id: &str) -> Result<Vec<FranchiseModel>, AppError> {
        let franchises = self.franchises.lock().unwrap();
        Ok(franchises
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// PostgreSQL implementation of the franchise repository
pub struct PostgresFranchiseRepository {
    pool: PgPool,
}

impl PostgresFranchiseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FranchiseRepository for PostgresFranchiseRepository {
    #[instrument(skip(self, franchise))]
    async fn create_franchise(&self, franchise: &FranchiseModel) -> Result<(), AppError> {
        debug!(franchise_id = %franchise.id, "Creating franchise in database");

        sqlx::query("INSERT INTO franchises (id, user_id, name) VALUES ($1, $2, $3)")
            .bind(&franchise.id)
            .bind(&franchise.user_id)
            .bind(&franchise.name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to create franchise in database");
                AppError::Database(e.to_string())
            })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_franchises(&self, user_id: &str) -> Result<Vec<FranchiseModel>, AppError> {
        let rows = sqlx::query(
            "SELECT id, user_id, name FROM franchises WHERE user_id = $1 ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list franchises from database");
            AppError::Database(e.to_string())
        })?;

        Ok(rows
            .iter()
            .map(|row| FranchiseModel {
                id: row.get("id"),
                user_id: row.get("user_id"),
                name: row.get("name"),
            })
            .collect())
    }
}
