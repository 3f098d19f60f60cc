// Public API - what other modules can use
pub use middleware::{require_token, AUTH_TOKEN_HEADER};
pub use service::UserService;

// Internal modules
pub mod handlers;
mod middleware;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
