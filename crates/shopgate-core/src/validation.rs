//! # Validation Module
//!
//! Input validation for the storefront services.
//!
//! ## Validation Strategy
//! Validation runs in the service layer before any persistence call, so
//! an invalid request never reaches the database. The database schema
//! (NOT NULL, UNIQUE) is the second line of defense.

use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::OrderItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an entity identifier.
///
/// Identifiers are UUID v4 strings assigned at creation; anything that
/// does not parse as a UUID is malformed input, not a missing entity.
///
/// ## Example
/// ```rust
/// use shopgate_core::validation::validate_entity_id;
///
/// assert!(validate_entity_id("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_entity_id("id", "not-a-uuid").is_err());
/// assert!(validate_entity_id("id", "").is_err());
/// ```
pub fn validate_entity_id(field: &'static str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }

    if Uuid::parse_str(id).is_err() {
        return Err(ValidationError::InvalidFormat { field });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a required string field is non-empty.
pub fn validate_required(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if price < 0.0 {
        return Err(ValidationError::Negative { field: "price" });
    }

    Ok(())
}

/// Validates a stock quantity supplied at product creation.
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "stock_quantity",
        });
    }

    Ok(())
}

// =============================================================================
// Order Validators
// =============================================================================

/// Validates the line items of a new order.
///
/// An order must contain at least one item. Item contents are taken as
/// supplied: product references are weak and prices are point-in-time
/// snapshots, neither is checked against the catalog here.
pub fn validate_order_items(items: &[OrderItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Empty { field: "items" });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
