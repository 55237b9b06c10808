//! # HTTP Error Mapping
//!
//! Bridges the service-layer error taxonomy onto HTTP responses. Every
//! handler returns [`ApiResult`], and the single [`IntoResponse`]
//! implementation here decides the status code and the JSON envelope:
//!
//! ```text
//! InvalidInput      → 400 Bad Request
//! Unauthenticated   → 401 Unauthorized
//! NotFound          → 404 Not Found
//! InsufficientStock → 409 Conflict
//! Internal          → 500 Internal Server Error
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use shopgate_core::CoreError;

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;

/// Newtype around [`CoreError`] so the HTTP mapping can live in this
/// crate without the core depending on axum.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            CoreError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            CoreError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            CoreError::InsufficientStock { .. } => (StatusCode::CONFLICT, "insufficient_stock"),
            CoreError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        // Internal details stay in the logs; the wire gets a generic line.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "Request failed");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopgate_core::ValidationError;

    fn status_of(err: CoreError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_taxonomy_maps_to_expected_status_codes() {
        assert_eq!(
            status_of(CoreError::InvalidInput(ValidationError::Required {
                field: "name"
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::Unauthenticated("bad token".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CoreError::not_found("product", "p-1")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::InsufficientStock {
                product_id: "p-1".to_string()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CoreError::Internal("db down".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
