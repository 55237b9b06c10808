//! # Gateway Configuration
//!
//! Environment-driven configuration for the HTTP gateway. Every knob
//! has a development default so `cargo run` works out of the box;
//! deployments override them through the environment.
//!
//! | Variable            | Default         |
//! |---------------------|-----------------|
//! | `HTTP_PORT`         | `8080`          |
//! | `DATABASE_PATH`     | `./shopgate.db` |
//! | `JWT_SECRET`        | dev-only value  |
//! | `JWT_LIFETIME_SECS` | `86400` (24h)   |

use std::env;

use thiserror::Error;
use tracing::warn;

/// Default token lifetime: 24 hours.
const DEFAULT_JWT_LIFETIME_SECS: i64 = 86_400;

/// Placeholder secret for local development only.
const DEV_JWT_SECRET: &str = "shopgate-dev-secret-do-not-deploy";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {variable}: {message}")]
    InvalidValue {
        variable: &'static str,
        message: String,
    },
}

/// Runtime configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Port the HTTP listener binds to.
    pub http_port: u16,
    /// Path to the SQLite database file.
    pub database_path: String,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    /// Access token lifetime, in seconds.
    pub jwt_lifetime_secs: i64,
}

impl ApiConfig {
    /// Loads configuration from the environment, falling back to
    /// development defaults for anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                variable: "HTTP_PORT",
                message: e.to_string(),
            })?,
            Err(_) => 8080,
        };

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./shopgate.db".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using development default");
            DEV_JWT_SECRET.to_string()
        });

        let jwt_lifetime_secs = match env::var("JWT_LIFETIME_SECS") {
            Ok(raw) => raw.parse::<i64>().map_err(|e| ConfigError::InvalidValue {
                variable: "JWT_LIFETIME_SECS",
                message: e.to_string(),
            })?,
            Err(_) => DEFAULT_JWT_LIFETIME_SECS,
        };

        Ok(ApiConfig {
            http_port,
            database_path,
            jwt_secret,
            jwt_lifetime_secs,
        })
    }

    /// Configuration suitable for tests: in-process defaults, a fixed
    /// secret, and a short token lifetime.
    pub fn for_tests() -> Self {
        ApiConfig {
            http_port: 0,
            database_path: ":memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_lifetime_secs: 3600,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
