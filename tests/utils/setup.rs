use std::sync::Arc;

use axum::Router;
use gamelog::auth::Authenticator;
use gamelog::franchise::repository::InMemoryFranchiseRepository;
use gamelog::game::repository::InMemoryGameRepository;
use gamelog::user::repository::InMemoryUserRepository;
use gamelog::{build_router, AppState};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

/// Builds the full application over in-memory repositories with a
/// test-only signing secret
pub fn test_app() -> TestApp {
    test_app_with_authenticator(Authenticator::new("integration-test-secret", 1))
}

/// Same, but with a caller-controlled authenticator (e.g. one whose
/// issued tokens are already expired)
pub fn test_app_with_authenticator(authenticator: Authenticator) -> TestApp {
    let state = AppState::new(
        Arc::new(authenticator),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryGameRepository::new()),
        Arc::new(InMemoryFranchiseRepository::new()),
    );

    TestApp {
        app: build_router(state.clone()),
        state,
    }
}
