//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Order Lifecycle
//! ```text
//! 1. CREATE
//!    └── insert() → order row + item rows in one transaction
//!
//! 2. STATUS UPDATES
//!    └── update_status() → overwrites status + updated_at
//!        (the total and the items are frozen at creation)
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use shopgate_core::{Order, OrderItem};

const SELECT_COLUMNS: &str = "id, user_id, status, total_amount, created_at, updated_at";

/// An `orders` table row, before its items are attached.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    status: String,
    total_amount: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            user_id: self.user_id,
            items,
            status: self.status,
            total_amount: self.total_amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order and its line items in a single transaction.
    ///
    /// The caller supplies the derived total and the initial status; the
    /// repository generates the id and timestamps.
    pub async fn insert(
        &self,
        user_id: &str,
        items: &[OrderItem],
        status: &str,
        total_amount: f64,
    ) -> DbResult<Order> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        debug!(id = %id, user_id = %user_id, items = items.len(), "Inserting order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, status, total_amount, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(status)
        .bind(total_amount)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price, position)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Order {
            id,
            user_id: user_id.to_string(),
            items: items.to_vec(),
            status: status.to_string(),
            total_amount,
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets an order (with its items) by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.get_items(&row.id).await?;
                Ok(Some(row.into_order(items)))
            }
            None => Ok(None),
        }
    }

    /// Overwrites the status and refreshes the updated timestamp.
    ///
    /// No transition checks: any status value the service accepts is
    /// written as-is. Returns `None` when no order matches.
    pub async fn update_status(&self, id: &str, status: &str) -> DbResult<Option<Order>> {
        debug!(id = %id, status = %status, "Updating order status");

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            UPDATE orders SET status = ?2, updated_at = ?3
            WHERE id = ?1
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.get_items(&row.id).await?;
                Ok(Some(row.into_order(items)))
            }
            None => Ok(None),
        }
    }

    /// Lists orders (with items), newest first, optionally filtered by
    /// owning user.
    pub async fn list(
        &self,
        user_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM orders
            WHERE (?1 IS NULL OR user_id = ?1)
            ORDER BY created_at DESC
            LIMIT ?2 OFFSET ?3
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.get_items(&row.id).await?;
            orders.push(row.into_order(items));
        }

        Ok(orders)
    }

    /// Counts orders matching the optional user filter.
    pub async fn count(&self, user_id: Option<&str>) -> DbResult<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE (?1 IS NULL OR user_id = ?1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }

    /// Fetches an order's line items in their original order.
    async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT product_id, quantity, price FROM order_items
            WHERE order_id = ?1
            ORDER BY position
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
