//! Authentication Module
//!
//! Bearer token issuing/validation, password accounts, and the middleware
//! that gates the item routes.

mod accounts;
mod middleware;
mod tokens;

pub use accounts::Accounts;
pub use middleware::require_bearer;
pub use tokens::{Claims, TokenIssuer, TokenPair, TokenType};
