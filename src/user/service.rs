use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::{
    models::NewUser,
    repository::{StoreError, UserRepository},
    types::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse},
};
use crate::{auth::Authenticator, shared::AppError};

/// Service for handling account business logic: input validation,
/// collaborator calls and error classification.
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    authenticator: Arc<Authenticator>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Creates a new account. Validation happens before any store call;
    /// duplicate email/username are client errors, anything else the store
    /// reports is a server error.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: CreateUserRequest) -> Result<UserResponse, AppError> {
        if request.id.as_deref().is_some_and(|id| !id.is_empty()) {
            return Err(AppError::Validation(
                "id must not be set: it is assigned on creation".to_string(),
            ));
        }
        if request.username.is_empty() {
            return Err(AppError::Validation("username is required".to_string()));
        }
        if request.email.is_empty() {
            return Err(AppError::Validation("email is required".to_string()));
        }
        if request.password.is_empty() {
            return Err(AppError::Validation("password is required".to_string()));
        }

        let user = self
            .repository
            .insert(NewUser {
                username: request.username,
                email: request.email,
                password: request.password,
            })
            .await
            .map_err(|e| match e {
                StoreError::EmailAlreadyExists | StoreError::UsernameAlreadyExists => {
                    AppError::Conflict(e.to_string())
                }
                other => AppError::Database(other.to_string()),
            })?;

        info!(user_id = %user.id, username = %user.username, "User created");
        Ok(UserResponse::from(user))
    }

    /// Authenticates credentials, issues a token and records the
    /// association. Credential failure of any kind is an unauthorized
    /// outcome, never a server error; issuance or association failure is.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        if request.email.is_empty() {
            return Err(AppError::Validation("email is required".to_string()));
        }
        if request.password.is_empty() {
            return Err(AppError::Validation("password is required".to_string()));
        }

        let user = self
            .repository
            .authenticate(&request.email, &request.password)
            .await
            .map_err(|e| {
                warn!(email = %request.email, error = %e, "Login rejected");
                AppError::Unauthorized("invalid email or password".to_string())
            })?;

        let token = self.authenticator.new_token_for_user(&user).map_err(|e| {
            error!(user_id = %user.id, error = %e, "Token issuance failed");
            AppError::Internal
        })?;

        self.repository
            .associate_token(&user.id, &token)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse { token })
    }

    /// Revokes the association for a presented token. The token must be
    /// present and decode; removal itself is idempotent, so logging out
    /// twice with the same token succeeds.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.authenticator.decode_token(token).map_err(|e| {
            warn!(error = %e, "Logout with undecodable token");
            AppError::Unauthorized("invalid auth token".to_string())
        })?;

        self.repository
            .remove_association(token)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        info!("User logged out");
        Ok(())
    }
}
