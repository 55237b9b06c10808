//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! The stock column only ever changes through [`increment_stock`], a
//! single-statement atomic read-modify-write. The non-negative stock
//! invariant itself is enforced one layer up, in the catalog service:
//! the repository will happily report a negative result so the service
//! can compensate.
//!
//! [`increment_stock`]: ProductRepository::increment_stock

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use shopgate_core::{NewProduct, Product, ProductUpdate};

const SELECT_COLUMNS: &str =
    "id, name, description, price, stock_quantity, category, created_at, updated_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product, generating its id and timestamps.
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name.clone(),
            description: new.description.clone(),
            price: new.price,
            stock_quantity: new.stock_quantity,
            category: new.category.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price, stock_quantity, category,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(&product.category)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces the mutable fields of a product and refreshes its
    /// updated timestamp. Stock quantity is not touched by this path.
    ///
    /// Returns `None` when no product matches.
    pub async fn update(&self, id: &str, update: &ProductUpdate) -> DbResult<Option<Product>> {
        debug!(id = %id, "Updating product");

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price = ?4,
                category = ?5,
                updated_at = ?6
            WHERE id = ?1
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .bind(&update.category)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Atomically increments the stock quantity by `delta` (positive =
    /// restock, negative = consumption) and refreshes the updated
    /// timestamp, returning the product as it is after the increment.
    ///
    /// This is a single statement, so concurrent adjustments to the same
    /// product serialize inside SQLite and cannot race each other. The
    /// result may be negative; checking and compensating is the catalog
    /// service's job.
    pub async fn increment_stock(&self, id: &str, delta: i64) -> DbResult<Option<Product>> {
        debug!(id = %id, delta, "Incrementing stock");

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products SET
                stock_quantity = stock_quantity + ?2,
                updated_at = ?3
            WHERE id = ?1
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(delta)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products, newest first, optionally filtered by category.
    pub async fn list(
        &self,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM products
            WHERE (?1 IS NULL OR category = ?1)
            ORDER BY created_at DESC
            LIMIT ?2 OFFSET ?3
            "#
        ))
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts products matching the optional category filter.
    ///
    /// Computed separately from [`list`](Self::list); the two are not a
    /// snapshot.
    pub async fn count(&self, category: Option<&str>) -> DbResult<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE (?1 IS NULL OR category = ?1)")
                .bind(category)
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
