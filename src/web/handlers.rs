use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::TOKEN_COOKIE;
use crate::shared::{AppError, AppState};
use crate::user::{
    types::{CreateUserRequest, LoginRequest},
    UserService,
};

/// Form payload for the signup page
#[derive(Debug, Deserialize, Default)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Form payload for the login page
#[derive(Debug, Deserialize, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// Page bodies are intentionally bare-bones; this surface exists for the
// auth flow, not for presentation.

/// GET / - home page, behind the cookie-presence gate
pub async fn home() -> Html<&'static str> {
    Html(
        "<h1>gamelog</h1>\
         <p><a href=\"/logout\">Log out</a></p>",
    )
}

/// GET /signup
pub async fn signup_page() -> Html<&'static str> {
    Html(
        "<h1>Sign up</h1>\
         <form method=\"post\" action=\"/signup\">\
         <input name=\"username\" placeholder=\"username\">\
         <input name=\"email\" placeholder=\"email\">\
         <input name=\"password\" type=\"password\" placeholder=\"password\">\
         <button type=\"submit\">Sign up</button>\
         </form>",
    )
}

/// GET /login
pub async fn login_page() -> Html<&'static str> {
    Html(
        "<h1>Log in</h1>\
         <form method=\"post\" action=\"/login\">\
         <input name=\"email\" placeholder=\"email\">\
         <input name=\"password\" type=\"password\" placeholder=\"password\">\
         <button type=\"submit\">Log in</button>\
         </form>",
    )
}

/// POST /signup - creates the account, then sends the browser to the
/// login page
#[instrument(name = "web_signup", skip(state, form))]
pub async fn signup_submit(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect, AppError> {
    let service = UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.authenticator),
    );
    let user = service
        .register(CreateUserRequest {
            id: None,
            username: form.username,
            email: form.email,
            password: form.password,
        })
        .await?;

    info!(user_id = %user.id, "User signed up via browser");

    Ok(Redirect::to("/login"))
}

/// POST /login - logs in, stores the token in the cookie and sends the
/// browser home
#[instrument(name = "web_login", skip(state, jar, form))]
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let service = UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.authenticator),
    );
    let login = service
        .login(LoginRequest {
            email: form.email,
            password: form.password,
        })
        .await?;

    let cookie = Cookie::build((TOKEN_COOKIE, login.token))
        .path("/")
        .http_only(true)
        .build();

    Ok((jar.add(cookie), Redirect::to("/")))
}

/// GET /logout - revokes the association for the cookie's token (when one
/// is present), clears the cookie and sends the browser to the login
/// page. Idempotent: logging out with no cookie, or with a token whose
/// association is already gone, still lands on the login page.
#[instrument(name = "web_logout", skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        state
            .user_repository
            .remove_association(cookie.value())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("Browser session logged out");
    }

    let removal = Cookie::build((TOKEN_COOKIE, "")).path("/").build();

    Ok((jar.remove(removal), Redirect::to("/login")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use crate::user::models::NewUser;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/signup", get(signup_page).post(signup_submit))
            .route("/login", get(login_page).post(login_submit))
            .route("/logout", get(logout))
            .with_state(state)
    }

    async fn state_with_user() -> AppState {
        let state = AppStateBuilder::new().build();
        state
            .user_repository
            .insert(NewUser {
                username: "test".to_string(),
                email: "test@test.com".to_string(),
                password: "t3$T123".to_string(),
            })
            .await
            .unwrap();
        state
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_cookie_and_redirects_home() {
        let state = state_with_user().await;
        let app = app(state);

        let response = app
            .oneshot(form_request(
                "/login",
                "email=test%40test.com&password=t3%24T123",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with(&format!("{}=", TOKEN_COOKIE)));
        assert!(set_cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_login_bad_credentials_is_unauthorized() {
        let state = state_with_user().await;
        let app = app(state);

        let response = app
            .oneshot(form_request(
                "/login",
                "email=test%40test.com&password=wrong",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_redirects_to_login() {
        let app = app(AppStateBuilder::new().build());

        let response = app
            .oneshot(form_request(
                "/signup",
                "username=test&email=test%40test.com&password=t3%24T123",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_signup_missing_fields_is_validation_error() {
        let app = app(AppStateBuilder::new().build());

        let response = app
            .oneshot(form_request("/signup", "email=test%40test.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logout_revokes_association_and_clears_cookie() {
        let state = state_with_user().await;

        // Log in through the service to get a live association
        let service = UserService::new(
            Arc::clone(&state.user_repository),
            Arc::clone(&state.authenticator),
        );
        let login = service
            .login(LoginRequest {
                email: "test@test.com".to_string(),
                password: "t3$T123".to_string(),
            })
            .await
            .unwrap();

        let app = app(state.clone());

        let request = Request::builder()
            .uri("/logout")
            .header(header::COOKIE, format!("{}={}", TOKEN_COOKIE, login.token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");

        // The association is gone
        assert!(state
            .user_repository
            .get_user_by_token(&login.token)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_logout_without_cookie_still_redirects() {
        let app = app(AppStateBuilder::new().build());

        let request = Request::builder()
            .uri("/logout")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }
}
