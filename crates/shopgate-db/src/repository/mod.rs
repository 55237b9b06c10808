//! Repository implementations, one per entity family.

pub mod order;
pub mod product;
pub mod user;
