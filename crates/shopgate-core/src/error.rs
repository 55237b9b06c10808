//! # Error Types
//!
//! Domain error taxonomy for shopgate.
//!
//! ## Error Flow
//! ```text
//! ValidationError ──► CoreError::InvalidInput ──► gateway ──► HTTP 400
//! DbError (shopgate-db) ──► CoreError::{NotFound, Internal}
//! stock underflow ──► CoreError::InsufficientStock ──► HTTP 409
//! ```
//!
//! Every failure is terminal for the request; the single local recovery
//! in the whole system is the stock compensation in the catalog service.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Storefront error taxonomy.
///
/// These propagate unchanged to the gateway, which is solely responsible
/// for mapping them to transport status codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed or missing required field. Never retried.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// No matching entity.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A stock adjustment would drive the quantity below zero.
    /// Reported after the automatic compensating increment.
    #[error("insufficient stock for product {product_id}")]
    InsufficientStock { product_id: String },

    /// Credential check failed (user directory only).
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Persistence failure or unexpected decode failure.
    /// No local recovery, no retry.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates an Internal error from any displayable cause.
    pub fn internal(cause: impl ToString) -> Self {
        CoreError::Internal(cause.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. All of them
/// surface as `CoreError::InvalidInput`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Numeric value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    /// Invalid format (e.g. malformed entity id).
    #[error("{field} has invalid format")]
    InvalidFormat { field: &'static str },

    /// A collection that must not be empty is empty.
    #[error("{field} must contain at least one element")]
    Empty { field: &'static str },

    /// Duplicate value for a unique field.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::not_found("product", "abc-123");
        assert_eq!(err.to_string(), "product not found: abc-123");

        let err = CoreError::InsufficientStock {
            product_id: "abc-123".to_string(),
        };
        assert_eq!(err.to_string(), "insufficient stock for product abc-123");
    }

    #[test]
    fn test_validation_converts_to_invalid_input() {
        let err: CoreError = ValidationError::Required { field: "name" }.into();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert_eq!(err.to_string(), "invalid input: name is required");
    }
}
