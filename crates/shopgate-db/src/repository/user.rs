//! # User Repository
//!
//! Database operations for the user directory. The repository stores
//! whatever hash the service hands it; hashing and verification live in
//! the service layer.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use shopgate_core::{NewUser, User, UserUpdate};

const SELECT_COLUMNS: &str = "id, email, password_hash, first_name, last_name, role, phone, \
                              address, created_at, updated_at";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user, generating its id and timestamps.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the email is already taken (the
    /// `users.email` unique index).
    pub async fn insert(&self, new: &NewUser, password_hash: &str) -> DbResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: new.email.clone(),
            password_hash: password_hash.to_string(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            role: new.role.clone(),
            phone: new.phone.clone(),
            address: new.address.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %user.id, email = %user.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, password_hash, first_name, last_name, role,
                phone, address, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.role)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by email (used by authentication).
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Replaces the profile fields of a user and refreshes the updated
    /// timestamp. The password hash is not touched by this path.
    ///
    /// Returns `None` when no user matches.
    pub async fn update(&self, id: &str, update: &UserUpdate) -> DbResult<Option<User>> {
        debug!(id = %id, "Updating user");

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                email = ?2,
                first_name = ?3,
                last_name = ?4,
                role = ?5,
                phone = ?6,
                address = ?7,
                updated_at = ?8
            WHERE id = ?1
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.role)
        .bind(&update.phone)
        .bind(&update.address)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user. Returns whether a row was actually deleted.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists users, newest first, optionally filtered by role.
    pub async fn list(&self, role: Option<&str>, limit: i64, offset: i64) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM users
            WHERE (?1 IS NULL OR role = ?1)
            ORDER BY created_at DESC
            LIMIT ?2 OFFSET ?3
            "#
        ))
        .bind(role)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Counts users matching the optional role filter.
    pub async fn count(&self, role: Option<&str>) -> DbResult<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE (?1 IS NULL OR role = ?1)")
                .bind(role)
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
