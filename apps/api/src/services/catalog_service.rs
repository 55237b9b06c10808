//! # Catalog Service
//!
//! Business rules for the product catalog. The interesting part is
//! stock adjustment:
//!
//! ```text
//! adjust_stock(id, delta)
//!   1. increment_stock(id, delta)      -- atomic, may go negative
//!   2. if result >= 0: done
//!   3. else: increment_stock(id, -delta)  -- compensate
//!           → InsufficientStock
//! ```
//!
//! Between steps 1 and 3 the stored value can be negative; concurrent
//! readers may observe it. The invariant holds at rest, not at every
//! instant.

use tracing::{error, info, warn};

use shopgate_core::validation::{
    validate_entity_id, validate_price, validate_required, validate_stock_quantity,
};
use shopgate_core::{
    normalize_filter, CoreError, CoreResult, NewProduct, PageRequest, Paged, Product, ProductUpdate,
};
use shopgate_db::{Database, ProductRepository};

use super::storage_error;

/// Service for catalog operations.
#[derive(Clone)]
pub struct CatalogService {
    products: ProductRepository,
}

impl CatalogService {
    pub fn new(db: &Database) -> Self {
        CatalogService {
            products: db.products(),
        }
    }

    /// Creates a product after validating its fields.
    pub async fn create(&self, new: NewProduct) -> CoreResult<Product> {
        validate_required("name", &new.name)?;
        validate_price(new.price)?;
        validate_stock_quantity(new.stock_quantity)?;

        let product = self.products.insert(&new).await.map_err(storage_error)?;

        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Fetches a product by id.
    pub async fn get(&self, id: &str) -> CoreResult<Product> {
        validate_entity_id("product id", id)?;

        self.products
            .get_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CoreError::not_found("product", id))
    }

    /// Replaces the descriptive fields of a product. Stock is only
    /// reachable through [`adjust_stock`](Self::adjust_stock).
    pub async fn update(&self, id: &str, update: ProductUpdate) -> CoreResult<Product> {
        validate_entity_id("product id", id)?;
        validate_required("name", &update.name)?;
        validate_price(update.price)?;

        self.products
            .update(id, &update)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CoreError::not_found("product", id))
    }

    /// Adjusts stock by a signed delta, enforcing non-negative stock.
    ///
    /// The adjustment is applied first and checked after; an adjustment
    /// that drives the quantity negative is undone with a compensating
    /// increment and reported as [`CoreError::InsufficientStock`].
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> CoreResult<Product> {
        validate_entity_id("product id", id)?;

        let product = self
            .products
            .increment_stock(id, delta)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CoreError::not_found("product", id))?;

        if product.stock_quantity < 0 {
            warn!(
                id = %id,
                delta,
                resulting = product.stock_quantity,
                "Stock adjustment rejected, compensating"
            );

            if let Err(e) = self.products.increment_stock(id, -delta).await {
                // The decrement is stranded; stock stays negative until
                // an operator restores it.
                error!(id = %id, error = %e, "Stock compensation failed");
                return Err(CoreError::Internal(format!(
                    "stock compensation failed: {e}"
                )));
            }

            return Err(CoreError::InsufficientStock {
                product_id: id.to_string(),
            });
        }

        info!(id = %id, delta, stock = product.stock_quantity, "Stock adjusted");
        Ok(product)
    }

    /// Lists products with normalized pagination and an optional
    /// category filter (blank filters mean "no filter").
    pub async fn list(&self, category: &str, page: PageRequest) -> CoreResult<Paged<Product>> {
        let page = page.normalize();
        let filter = normalize_filter(category);

        let total = self.products.count(filter).await.map_err(storage_error)?;
        let items = self
            .products
            .list(filter, page.limit, page.offset)
            .await
            .map_err(storage_error)?;

        Ok(Paged { items, total })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopgate_core::ValidationError;
    use shopgate_db::DbConfig;

    fn widget(name: &str, category: &str, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            price: 9.99,
            stock_quantity: stock,
            category: category.to_string(),
        }
    }

    async fn service() -> CatalogService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CatalogService::new(&db)
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price_and_stock() {
        let svc = service().await;

        let mut bad_price = widget("Widget", "tools", 1);
        bad_price.price = -0.01;
        let err = svc.create(bad_price).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput(ValidationError::Negative { field: "price" })
        ));

        let mut bad_stock = widget("Widget", "tools", 1);
        bad_stock.stock_quantity = -1;
        let err = svc.create(bad_stock).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput(ValidationError::Negative { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_with_malformed_id_is_invalid_input() {
        let svc = service().await;

        let err = svc.get("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_adjust_stock_applies_signed_deltas() {
        let svc = service().await;
        let created = svc.create(widget("Widget", "tools", 10)).await.unwrap();

        let after = svc.adjust_stock(&created.id, -4).await.unwrap();
        assert_eq!(after.stock_quantity, 6);

        let after = svc.adjust_stock(&created.id, 4).await.unwrap();
        assert_eq!(after.stock_quantity, 10);
    }

    #[tokio::test]
    async fn test_oversized_decrement_is_rejected_and_undone() {
        let svc = service().await;
        let created = svc.create(widget("Widget", "tools", 3)).await.unwrap();

        let err = svc.adjust_stock(&created.id, -5).await.unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));

        // The failed adjustment must leave stock exactly where it was
        let after = svc.get(&created.id).await.unwrap();
        assert_eq!(after.stock_quantity, 3);
    }

    #[tokio::test]
    async fn test_decrement_to_exactly_zero_succeeds() {
        let svc = service().await;
        let created = svc.create(widget("Widget", "tools", 3)).await.unwrap();

        let after = svc.adjust_stock(&created.id, -3).await.unwrap();
        assert_eq!(after.stock_quantity, 0);

        // And the next decrement fails
        let err = svc.adjust_stock(&created.id, -1).await.unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
    }

    #[tokio::test]
    async fn test_adjust_stock_missing_product_is_not_found() {
        let svc = service().await;

        let err = svc
            .adjust_stock("00000000-0000-0000-0000-000000000000", -1)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_normalizes_pagination_and_blank_filter() {
        let svc = service().await;
        for i in 0..3 {
            svc.create(widget(&format!("w-{i}"), "tools", 1))
                .await
                .unwrap();
        }

        // page 0 and limit 0 fall back to defaults; "  " means no filter
        let paged = svc
            .list("  ", PageRequest { page: 0, limit: 0 })
            .await
            .unwrap();
        assert_eq!(paged.total, 3);
        assert_eq!(paged.items.len(), 3);

        let filtered = svc.list("gifts", PageRequest::default()).await.unwrap();
        assert_eq!(filtered.total, 0);
    }
}
