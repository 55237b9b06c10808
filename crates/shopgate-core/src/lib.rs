//! # shopgate-core: Pure Business Logic for shopgate
//!
//! This crate is the heart of the storefront backend. It contains the
//! rules with real invariants to protect, as pure functions and plain
//! types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   HTTP Gateway (apps/api)                   │
//! │     /products  /orders  /users  /auth                       │
//! └──────────────────────────┬──────────────────────────────────┘
//! │                          │                                   │
//! │  ┌───────────────────────▼───────────────────────────────┐  │
//! │  │            ★ shopgate-core (THIS CRATE) ★             │  │
//! │  │                                                       │  │
//! │  │   types      validation     page        error         │  │
//! │  │   Product    field rules    normalize   taxonomy      │  │
//! │  │   Order      id checks      skip/limit  http-agnostic │  │
//! │  │                                                       │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                   │  │
//! │  └───────────────────────┬───────────────────────────────┘  │
//! │                          │                                   │
//! │  ┌───────────────────────▼───────────────────────────────┐  │
//! │  │              shopgate-db (persistence)                │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **No I/O**: database and network access are forbidden here
//! 3. **Explicit Errors**: typed error enums, never strings or panics

pub mod error;
pub mod page;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use page::{normalize_filter, PageRequest, Paged, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use types::{
    order_total, NewOrder, NewProduct, NewUser, Order, OrderItem, Product, ProductUpdate, User,
    UserUpdate, PENDING_STATUS,
};
