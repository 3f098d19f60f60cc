// Public API - what other modules can use
pub use middleware::require_login;

/// Cookie carrying the auth token on the browser surface
pub const TOKEN_COOKIE: &str = "token";

// Internal modules
pub mod handlers;
mod middleware;
