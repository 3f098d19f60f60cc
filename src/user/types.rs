use serde::{Deserialize, Serialize};

use super::models::UserModel;

/// Request payload for creating a user. All fields default so that a
/// missing field surfaces as a validation error rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize, Default)]
pub struct CreateUserRequest {
    /// Must be empty: the store assigns identity on insert
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request payload for logging in
#[derive(Debug, Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A user as returned to clients. Constructed from [`UserModel`] so the
/// password hash can never leak into a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_excludes_password() {
        let user = UserModel {
            id: "id-1".to_string(),
            username: "test".to_string(),
            email: "test@test.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
        };

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("test@test.com"));
        assert!(!json.contains("password"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_create_request_missing_fields_deserialize_empty() {
        let request: CreateUserRequest = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(request.email, "a@b.c");
        assert!(request.username.is_empty());
        assert!(request.password.is_empty());
        assert!(request.id.is_none());
    }
}
