use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::{debug, instrument};

use super::TOKEN_COOKIE;

/// Login gate for browser pages - redirects to the login page when the
/// token cookie is absent.
///
/// Deliberately gates on presence only: whether the token inside the
/// cookie is still valid is decided by the API call the page eventually
/// makes, which returns 401 for a present-but-invalid token. Presence
/// gating here is a UX shortcut, not a security decision.
#[instrument(skip(jar, req, next))]
pub async fn require_login(jar: CookieJar, req: Request, next: Next) -> Response {
    if jar.get(TOKEN_COOKIE).is_none() {
        debug!("No token cookie, redirecting to login page");
        return Redirect::to("/login").into_response();
    }

    next.run(req).await
}
