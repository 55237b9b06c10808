//! # HTTP Routes
//!
//! One module per resource, each exposing a `router()` that the app
//! merges. Handlers deserialize the request, call the matching service,
//! and hand any error to the shared mapping in [`crate::error`].

pub mod health;
pub mod orders;
pub mod products;
pub mod users;
