//! # shopgate-api: HTTP Gateway
//!
//! Single entry point for the storefront backend. The gateway owns the
//! HTTP surface; business rules live in [`services`] and persistence in
//! `shopgate-db`.
//!
//! ## Request Flow
//! ```text
//! HTTP request
//!   └── routes/*       deserialize, extract
//!        └── services/* validate, apply rules
//!             └── shopgate-db repositories
//!                  └── SQLite
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;

use shopgate_db::Database;

use crate::auth::JwtManager;
use crate::config::ApiConfig;

/// Shared state handed to every handler.
pub struct AppState {
    pub db: Database,
    pub jwt: JwtManager,
}

impl AppState {
    pub fn new(db: Database, config: &ApiConfig) -> Self {
        AppState {
            jwt: JwtManager::new(&config.jwt_secret, config.jwt_lifetime_secs),
            db,
        }
    }
}

/// Builds the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::products::router())
        .merge(routes::orders::router())
        .merge(routes::users::router())
        .merge(routes::health::router())
        .with_state(state)
}
