//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Secret used when `JWT_SECRET` is not set. Only suitable for local development.
pub const DEV_JWT_SECRET: &str = "local-development-secret-change-this-in-production";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// sqlx connection URL for the item store
    pub database_url: String,
    /// Lifetime in seconds of a cached item
    pub cache_ttl: u64,
    /// HMAC secret for signing bearer tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_ttl: u64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: u64,
    /// bcrypt work factor for stored passwords
    pub bcrypt_cost: u32,
    /// Optional user created at startup if it does not exist yet
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_URL` - Item store URL (default: sqlite:inventory.db)
    /// - `CACHE_TTL` - Cached item lifetime in seconds (default: 300)
    /// - `JWT_SECRET` - Token signing secret (default: development secret)
    /// - `ACCESS_TOKEN_TTL` - Access token lifetime in seconds (default: 300)
    /// - `REFRESH_TOKEN_TTL` - Refresh token lifetime in seconds (default: 86400)
    /// - `BCRYPT_COST` - Password hashing cost (default: 12)
    /// - `ADMIN_USERNAME` / `ADMIN_PASSWORD` - Bootstrap user (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            access_token_ttl: parse_var("ACCESS_TOKEN_TTL").unwrap_or(defaults.access_token_ttl),
            refresh_token_ttl: parse_var("REFRESH_TOKEN_TTL")
                .unwrap_or(defaults.refresh_token_ttl),
            bcrypt_cost: parse_var("BCRYPT_COST").unwrap_or(defaults.bcrypt_cost),
            admin_username: env::var("ADMIN_USERNAME").ok().filter(|v| !v.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Returns true when the signing secret is still the development default.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: "sqlite:inventory.db".to_string(),
            cache_ttl: 300,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            access_token_ttl: 300,
            refresh_token_ttl: 86_400,
            bcrypt_cost: 12,
            admin_username: None,
            admin_password: None,
        }
    }
}
