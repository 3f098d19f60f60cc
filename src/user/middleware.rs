use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use crate::shared::{AppError, AppState};

/// Header carrying the auth token on the API surface
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Token authentication middleware for the API surface - verifies the
/// x-auth-token header and attaches the resolved user to the request.
/// Usage: .layer(middleware::from_fn_with_state(app_state.clone(), user::require_token))
/// Handlers can then extract Extension(user): Extension<UserModel>.
///
/// Signature and expiry are checked first, with no I/O, so garbage or
/// expired tokens are rejected before the store is ever consulted. The
/// store association is the final authority: a token that decodes fine but
/// has no live association (revoked, or never issued by us) is rejected.
#[instrument(skip(state, req, next))]
pub async fn require_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing x-auth-token header in request");
            AppError::Unauthorized("missing auth token".to_string())
        })?;

    if let Err(e) = state.authenticator.decode_token(token) {
        warn!(error = %e, "Token verification failed");
        return Err(AppError::Unauthorized("invalid auth token".to_string()));
    }

    let user = state
        .user_repository
        .get_user_by_token(token)
        .await
        .map_err(|e| {
            warn!(error = %e, "No live association for token");
            AppError::Unauthorized("invalid auth token".to_string())
        })?;

    debug!(user_id = %user.id, "Authentication successful, attaching user to request");

    // Add the user to request extensions for handlers to use
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
