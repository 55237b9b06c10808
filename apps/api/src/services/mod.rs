//! # Service Layer
//!
//! One service per entity family, each owning the business rules for
//! its slice of the storefront:
//!
//! - [`CatalogService`]: products and the non-negative stock invariant
//! - [`OrderService`]: order creation, derived totals, status updates
//! - [`UserService`]: accounts, password hashing, authentication
//!
//! Services validate input, call the repositories, and translate
//! storage errors into the shared taxonomy. Handlers stay thin.

pub mod catalog_service;
pub mod order_service;
pub mod user_service;

pub use catalog_service::CatalogService;
pub use order_service::OrderService;
pub use user_service::{AuthResponse, UserService};

use shopgate_core::CoreError;
use shopgate_db::DbError;

/// Default translation for storage errors: anything a service does not
/// handle specifically is an internal fault.
pub(crate) fn storage_error(err: DbError) -> CoreError {
    CoreError::Internal(err.to_string())
}
