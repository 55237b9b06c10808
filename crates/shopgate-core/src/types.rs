//! # Domain Types
//!
//! Entity types shared between the persistence layer and the gateway.
//!
//! Monetary amounts are `f64` to match the wire format; an order's total
//! is derived once at creation from the caller-supplied per-item prices
//! and never recomputed afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to every newly created order.
///
/// After creation the status is an open string field: any non-empty
/// caller-supplied value is accepted, with no transition table.
pub const PENDING_STATUS: &str = "pending";

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: String,

    /// Display name. Never empty.
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Unit price. Never negative.
    pub price: f64,

    /// Current stock level.
    /// Invariant: never negative after an adjustment completes.
    pub stock_quantity: i64,

    /// Category used for list filtering.
    pub category: String,

    /// When the product was created (UTC, set on write).
    pub created_at: DateTime<Utc>,

    /// When the product was last updated (UTC, set on write).
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub stock_quantity: i64,
    #[serde(default)]
    pub category: String,
}

/// Payload for updating a product.
///
/// Full replace of the listed mutable fields. Stock quantity is
/// deliberately excluded from this path; it only moves through the
/// atomic stock adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
}

// =============================================================================
// Order
// =============================================================================

/// A line item in an order.
///
/// `price` is a snapshot captured at order time, not a live reference
/// into the catalog. `product_id` is a weak reference: it is not
/// validated against the catalog when the order is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i64,
    /// Unit price at order time.
    pub price: f64,
}

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: String,

    /// Owning user. Weak reference, never empty.
    pub user_id: String,

    /// Ordered line items. At least one element.
    pub items: Vec<OrderItem>,

    /// Lifecycle status. `pending` at creation, free-form afterwards.
    pub status: String,

    /// Derived total: sum of quantity x price over all items.
    /// Computed once at creation, never recomputed on update.
    pub total_amount: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<OrderItem>,
}

/// Computes an order's total amount from its line items.
pub fn order_total(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| item.quantity as f64 * item.price)
        .sum()
}

// =============================================================================
// User
// =============================================================================

/// A storefront user.
///
/// The password hash never leaves the backend: it is skipped during
/// serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: String,

    /// Email address. Unique across users.
    pub email: String,

    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub phone: String,
    pub address: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Payload for updating a user's profile.
/// The password is not touched by this path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, quantity: i64, price: f64) -> OrderItem {
        OrderItem {
            product_id: product_id.to_string(),
            quantity,
            price,
        }
    }

    #[test]
    fn test_order_total() {
        let items = vec![item("p1", 2, 10.0), item("p2", 1, 5.0)];
        assert_eq!(order_total(&items), 25.0);
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(order_total(&[]), 0.0);
    }

    #[test]
    fn test_order_total_single_item() {
        assert_eq!(order_total(&[item("p1", 3, 19.99)]), 3.0 * 19.99);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: "u1".to_string(),
            email: "a@b.c".to_string(),
            password_hash: "secret-hash".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            role: "customer".to_string(),
            phone: String::new(),
            address: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
