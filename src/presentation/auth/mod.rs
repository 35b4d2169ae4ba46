mod middleware;
mod token_store;

pub use middleware::require_auth;
pub use token_store::TokenStore;
