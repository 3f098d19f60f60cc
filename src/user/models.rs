use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the users table. The password is persisted only as a
/// bcrypt hash and the model itself is never serialized into a response;
/// see [`super::types::UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: String, // UUID v4, assigned by the store on insert
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl UserModel {
    /// Creates a new user model with a generated id
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
        }
    }
}

/// A user as submitted for creation, before the store assigns an identity
/// and hashes the password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}
