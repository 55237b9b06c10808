//! # shopgate-db: Database Layer for shopgate
//!
//! SQLite persistence behind narrow repository interfaces.
//!
//! ## The Persistence Port
//! The repositories are the only code in the workspace that talks SQL.
//! Per entity family they expose insert, find-one, find-many with
//! filter/sort/skip/limit, count, atomic find-and-update
//! (`UPDATE .. RETURNING`), and delete-one. The service layer composes
//! these; it never sees a connection or a row.
//!
//! ```text
//! services (apps/api)
//!      │ typed calls
//!      ▼
//! ProductRepository / OrderRepository / UserRepository
//!      │ SQL
//!      ▼
//! SqlitePool (WAL mode, shared by all in-flight requests)
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
