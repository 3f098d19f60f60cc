use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::models::{NewUser, UserModel};

/// Sentinel store conditions the handlers classify against. Anything the
/// store cannot name lands in `Database` and is reported as a server error
/// upstream.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a user with this email already exists")]
    EmailAlreadyExists,

    #[error("a user with this username already exists")]
    UsernameAlreadyExists,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("no user associated with this token")]
    NoSuchToken,

    #[error("database error: {0}")]
    Database(String),
}

/// Trait for user persistence and the token-to-user association.
///
/// Uniqueness on concurrent signups is enforced atomically inside the
/// implementation (a mutex-guarded map in memory, unique constraints in
/// postgres) and is never re-checked by handlers.
#[async_trait]
pub trait UserRepository {
    /// Persists a new user, hashing the password and assigning the id.
    async fn insert(&self, user: NewUser) -> Result<UserModel, StoreError>;

    /// Credential check. Fails with `InvalidCredentials` for an unknown
    /// email and for a wrong password alike, so callers cannot probe for
    /// account existence.
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserModel, StoreError>;

    /// Records that this token currently authenticates this user. A user
    /// may hold several live associations at once (multi-session).
    async fn associate_token(&self, user_id: &str, token: &str) -> Result<(), StoreError>;

    /// Resolves a token to the user it authenticates, failing with
    /// `NoSuchToken` when no live association exists.
    async fn get_user_by_token(&self, token: &str) -> Result<UserModel, StoreError>;

    /// Deletes the association for a token. Idempotent: removing an absent
    /// association succeeds.
    async fn remove_association(&self, token: &str) -> Result<(), StoreError>;
}

/// In-memory implementation of UserRepository for development and testing
///
/// This provides a realistic implementation that can be used in development
/// without requiring a real database connection. Data is stored in memory
/// and will be lost when the application restarts.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, UserModel>>,
    tokens: Mutex<HashMap<String, String>>, // token -> user id
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of users in the repository
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Returns the current number of live token associations
    pub fn association_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user))]
    async fn insert(&self, user: NewUser) -> Result<UserModel, StoreError> {
        debug!(username = %user.username, email = %user.email, "Inserting user in memory");

        // Uniqueness check, hash and insert all happen under the one lock,
        // so concurrent signups with the same email cannot both win
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.email == user.email) {
            warn!(email = %user.email, "Email already taken");
            return Err(StoreError::EmailAlreadyExists);
        }
        if users.values().any(|u| u.username == user.username) {
            warn!(username = %user.username, "Username already taken");
            return Err(StoreError::UsernameAlreadyExists);
        }

        let password_hash = bcrypt::hash(&user.password, bcrypt::DEFAULT_COST)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let model = UserModel::new(user.username, user.email, password_hash);
        users.insert(model.id.clone(), model.clone());

        debug!(user_id = %model.id, "User inserted in memory");
        Ok(model)
    }

    #[instrument(skip(self, password))]
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserModel, StoreError> {
        debug!(email = %email, "Authenticating user against memory");

        let users = self.users.lock().unwrap();
        let user = users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::InvalidCredentials)?;
        drop(users);

        let verified = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        if !verified {
            debug!(email = %email, "Password mismatch");
            return Err(StoreError::InvalidCredentials);
        }

        Ok(user)
    }

    #[instrument(skip(self, token))]
    async fn associate_token(&self, user_id: &str, token: &str) -> Result<(), StoreError> {
        debug!(user_id = %user_id, "Associating token with user in memory");

        let mut tokens = self.tokens.lock().unwrap();
        tokens.insert(token.to_string(), user_id.to_string());
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn get_user_by_token(&self, token: &str) -> Result<UserModel, StoreError> {
        let user_id = {
            let tokens = self.tokens.lock().unwrap();
            tokens.get(token).cloned().ok_or(StoreError::NoSuchToken)?
        };

        let users = self.users.lock().unwrap();
        users
            .get(&user_id)
            .cloned()
            .ok_or(StoreError::NoSuchToken)
    }

    #[instrument(skip(self, token))]
    async fn remove_association(&self, token: &str) -> Result<(), StoreError> {
        let mut tokens = self.tokens.lock().unwrap();
        if tokens.remove(token).is_none() {
            debug!("No association to remove for token");
        }
        Ok(())
    }
}

/// PostgreSQL implementation of the user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn user_from_row(row: &sqlx::postgres::PgRow) -> UserModel {
        UserModel {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user))]
    async fn insert(&self, user: NewUser) -> Result<UserModel, StoreError> {
        debug!(username = %user.username, email = %user.email, "Inserting user in database");

        let password_hash = bcrypt::hash(&user.password, bcrypt::DEFAULT_COST)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let model = UserModel::new(user.username, user.email, password_hash);

        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4)",
        )
        .bind(&model.id)
        .bind(&model.username)
        .bind(&model.email)
        .bind(&model.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to insert user in database");
            match &e {
                // Unique-constraint violations become the sentinel
                // conditions the handlers map to a client error
                sqlx::Error::Database(db) => match db.constraint() {
                    Some("users_email_key") => StoreError::EmailAlreadyExists,
                    Some("users_username_key") => StoreError::UsernameAlreadyExists,
                    _ => StoreError::Database(e.to_string()),
                },
                _ => StoreError::Database(e.to_string()),
            }
        })?;

        debug!(user_id = %model.id, "User inserted in database");
        Ok(model)
    }

    #[instrument(skip(self, password))]
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserModel, StoreError> {
        debug!(email = %email, "Authenticating user against database");

        let row = sqlx::query(
            "SELECT id, username, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch user from database");
            StoreError::Database(e.to_string())
        })?;

        let user = match row {
            Some(row) => Self::user_from_row(&row),
            None => return Err(StoreError::InvalidCredentials),
        };

        let verified = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        if !verified {
            debug!(email = %email, "Password mismatch");
            return Err(StoreError::InvalidCredentials);
        }

        Ok(user)
    }

    #[instrument(skip(self, token))]
    async fn associate_token(&self, user_id: &str, token: &str) -> Result<(), StoreError> {
        debug!(user_id = %user_id, "Associating token with user in database");

        sqlx::query(
            "INSERT INTO user_tokens (token, user_id) VALUES ($1, $2)
             ON CONFLICT (token) DO UPDATE SET user_id = EXCLUDED.user_id",
        )
        .bind(token)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to associate token in database");
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn get_user_by_token(&self, token: &str) -> Result<UserModel, StoreError> {
        let row = sqlx::query(
            "SELECT u.id, u.username, u.email, u.password_hash
             FROM users u
             JOIN user_tokens t ON t.user_id = u.id
             WHERE t.token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch user by token from database");
            StoreError::Database(e.to_string())
        })?;

        row.map(|r| Self::user_from_row(&r))
            .ok_or(StoreError::NoSuchToken)
    }

    #[instrument(skip(self, token))]
    async fn remove_association(&self, token: &str) -> Result<(), StoreError> {
        // rows_affected is deliberately ignored: logout is idempotent
        sqlx::query("DELETE FROM user_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to remove token association from database");
                StoreError::Database(e.to_string())
            })?;

        Ok(())
    }
}
