// Public API - what other modules can use
pub use token::{Authenticator, TokenError};
pub use types::TokenClaims;

// Internal modules
mod token;
mod types;
