//! # Order Service
//!
//! Business rules for orders. Totals are always derived server-side
//! from the line items (`Σ quantity × price`); whatever total a client
//! might send is ignored. New orders start in the pending status, but
//! after that the status field is free-form: update_status writes any
//! non-empty value without a transition table.
//!
//! Creating an order does NOT touch stock. Callers are expected to
//! reserve stock through the catalog service first; the two steps are
//! not transactional.

use tracing::info;

use shopgate_core::validation::{validate_entity_id, validate_order_items, validate_required};
use shopgate_core::{
    normalize_filter, order_total, CoreError, CoreResult, NewOrder, Order, PageRequest, Paged,
    PENDING_STATUS,
};
use shopgate_db::{Database, OrderRepository};

use super::storage_error;

/// Service for order operations.
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
}

impl OrderService {
    pub fn new(db: &Database) -> Self {
        OrderService { orders: db.orders() }
    }

    /// Creates an order in the pending status with a derived total.
    pub async fn create(&self, new: NewOrder) -> CoreResult<Order> {
        validate_required("user id", &new.user_id)?;
        validate_order_items(&new.items)?;

        let total = order_total(&new.items);
        let order = self
            .orders
            .insert(&new.user_id, &new.items, PENDING_STATUS, total)
            .await
            .map_err(storage_error)?;

        info!(
            id = %order.id,
            user_id = %order.user_id,
            total = order.total_amount,
            "Order created"
        );
        Ok(order)
    }

    /// Fetches an order by id.
    pub async fn get(&self, id: &str) -> CoreResult<Order> {
        validate_entity_id("order id", id)?;

        self.orders
            .get_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CoreError::not_found("order", id))
    }

    /// Overwrites the order status with any non-empty value.
    pub async fn update_status(&self, id: &str, status: &str) -> CoreResult<Order> {
        validate_entity_id("order id", id)?;
        validate_required("status", status)?;

        let order = self
            .orders
            .update_status(id, status)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CoreError::not_found("order", id))?;

        info!(id = %id, status = %status, "Order status updated");
        Ok(order)
    }

    /// Lists orders with normalized pagination and an optional user
    /// filter.
    pub async fn list(&self, user_id: &str, page: PageRequest) -> CoreResult<Paged<Order>> {
        let page = page.normalize();
        let filter = normalize_filter(user_id);

        let total = self.orders.count(filter).await.map_err(storage_error)?;
        let items = self
            .orders
            .list(filter, page.limit, page.offset)
            .await
            .map_err(storage_error)?;

        Ok(Paged { items, total })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
