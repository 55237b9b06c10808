//! # Pagination/Filter Policy
//!
//! Shared normalization rules for list queries, used by the catalog,
//! order, and user listings.
//!
//! ## Contract
//! ```text
//! page  < 1            → 1
//! limit outside [1,100] → 10
//! skip = (page - 1) * limit
//! equality filter applied only when the filter value is non-empty
//! ordering: created_at DESC (ties unordered at timestamp precision)
//! ```
//!
//! The total match count and the returned page are computed from two
//! separate reads, so the total may be stale relative to the page under
//! concurrent writes.

use serde::{Deserialize, Serialize};

/// Limit applied when the caller's limit is out of range.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Largest limit a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

// =============================================================================
// Page Request
// =============================================================================

/// Raw paging parameters as supplied by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest { page: 1, limit: DEFAULT_PAGE_LIMIT }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        PageRequest { page, limit }
    }

    /// Applies the normalization rules.
    ///
    /// Idempotent: normalizing an already-normalized request returns the
    /// same values.
    pub fn normalize(self) -> NormalizedPage {
        let page = if self.page < 1 { 1 } else { self.page };
        let limit = if self.limit < 1 || self.limit > MAX_PAGE_LIMIT {
            DEFAULT_PAGE_LIMIT
        } else {
            self.limit
        };

        NormalizedPage {
            page,
            limit,
            // Saturates: an absurdly large page yields an offset past
            // every row, which reads as an empty page.
            offset: (page - 1).saturating_mul(limit),
        }
    }
}

/// Paging parameters after normalization, ready for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedPage {
    pub page: i64,
    pub limit: i64,
    /// Number of matching entities to skip: `(page - 1) * limit`.
    pub offset: i64,
}

/// Normalizes an equality filter: only non-empty values filter.
pub fn normalize_filter(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// =============================================================================
// Page Response
// =============================================================================

/// A page of entities plus the separately computed total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_to_out_of_range_input() {
        let p = PageRequest::new(0, 0).normalize();
        assert_eq!(p, NormalizedPage { page: 1, limit: 10, offset: 0 });

        // Same result as the explicit defaults
        assert_eq!(p, PageRequest::new(1, 10).normalize());
    }

    #[test]
    fn test_oversized_limit_falls_back_to_default() {
        let p = PageRequest::new(1, 1000).normalize();
        assert_eq!(p.limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_negative_page_clamps_to_first() {
        let p = PageRequest::new(-5, 20).normalize();
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_offset_computation() {
        let p = PageRequest::new(3, 25).normalize();
        assert_eq!(p.offset, 50);
        assert_eq!(p.limit, 25);
    }

    #[test]
    fn test_huge_page_saturates_instead_of_overflowing() {
        let p = PageRequest::new(i64::MAX, 100).normalize();
        assert_eq!(p.offset, i64::MAX);

        // No saturation needed when the product fits
        let p = PageRequest::new(i64::MAX, 1).normalize();
        assert_eq!(p.offset, i64::MAX - 1);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = PageRequest::new(0, 1000).normalize();
        let twice = PageRequest::new(once.page, once.limit).normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_only_when_non_empty() {
        assert_eq!(normalize_filter(""), None);
        assert_eq!(normalize_filter("   "), None);
        assert_eq!(normalize_filter("books"), Some("books"));
    }
}
