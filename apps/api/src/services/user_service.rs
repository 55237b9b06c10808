//! # User Service
//!
//! Account management and authentication. Passwords are Argon2-hashed
//! before they reach storage and the hash never leaves this layer (the
//! wire type skips it during serialization as a second line of
//! defense).

use serde::Serialize;
use tracing::{info, warn};

use shopgate_core::validation::{validate_entity_id, validate_required};
use shopgate_core::{
    normalize_filter, CoreError, CoreResult, NewUser, PageRequest, Paged, User, UserUpdate,
    ValidationError,
};
use shopgate_db::{Database, DbError, UserRepository};

use super::storage_error;
use crate::auth::{hash_password, verify_password, JwtManager};

/// A successful authentication: the account plus a fresh access token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Service for user operations.
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    jwt: JwtManager,
}

impl UserService {
    pub fn new(db: &Database, jwt: JwtManager) -> Self {
        UserService {
            users: db.users(),
            jwt,
        }
    }

    /// Registers a user, hashing the password before storage.
    pub async fn create(&self, new: NewUser) -> CoreResult<User> {
        validate_required("email", &new.email)?;
        validate_required("password", &new.password)?;

        let password_hash = hash_password(&new.password)?;

        let user = match self.users.insert(&new, &password_hash).await {
            Ok(user) => user,
            // A taken email is a caller mistake, not a server fault
            Err(DbError::UniqueViolation { .. }) => {
                return Err(CoreError::InvalidInput(ValidationError::Duplicate {
                    field: "email",
                    value: new.email,
                }))
            }
            Err(e) => return Err(storage_error(e)),
        };

        info!(id = %user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Fetches a user by id.
    pub async fn get(&self, id: &str) -> CoreResult<User> {
        validate_entity_id("user id", id)?;

        self.users
            .get_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CoreError::not_found("user", id))
    }

    /// Replaces a user's profile fields. The password hash is never
    /// touched by this path.
    pub async fn update(&self, id: &str, update: UserUpdate) -> CoreResult<User> {
        validate_entity_id("user id", id)?;
        validate_required("email", &update.email)?;

        match self.users.update(id, &update).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(CoreError::not_found("user", id)),
            Err(DbError::UniqueViolation { .. }) => {
                Err(CoreError::InvalidInput(ValidationError::Duplicate {
                    field: "email",
                    value: update.email,
                }))
            }
            Err(e) => Err(storage_error(e)),
        }
    }

    /// Deletes a user.
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        validate_entity_id("user id", id)?;

        let deleted = self.users.delete(id).await.map_err(storage_error)?;
        if !deleted {
            return Err(CoreError::not_found("user", id));
        }

        info!(id = %id, "User deleted");
        Ok(())
    }

    /// Lists users with normalized pagination and an optional role
    /// filter.
    pub async fn list(&self, role: &str, page: PageRequest) -> CoreResult<Paged<User>> {
        let page = page.normalize();
        let filter = normalize_filter(role);

        let total = self.users.count(filter).await.map_err(storage_error)?;
        let items = self
            .users
            .list(filter, page.limit, page.offset)
            .await
            .map_err(storage_error)?;

        Ok(Paged { items, total })
    }

    /// Verifies credentials and issues an access token.
    ///
    /// An unknown email reports not-found; a known email with the wrong
    /// password reports unauthenticated.
    pub async fn authenticate(&self, email: &str, password: &str) -> CoreResult<AuthResponse> {
        validate_required("email", email)?;
        validate_required("password", password)?;

        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CoreError::not_found("user", email))?;

        if !verify_password(password, &user.password_hash) {
            warn!(email = %email, "Authentication failed");
            return Err(CoreError::Unauthenticated(
                "invalid email or password".to_string(),
            ));
        }

        let token = self.jwt.issue(&user)?;

        info!(id = %user.id, "User authenticated");
        Ok(AuthResponse { token, user })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopgate_db::DbConfig;

    fn customer(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "hunter2".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: "customer".to_string(),
            phone: String::new(),
            address: String::new(),
        }
    }

    async fn service() -> UserService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        UserService::new(&db, JwtManager::new("test-secret", 3600))
    }

    #[tokio::test]
    async fn test_create_hashes_the_password() {
        let svc = service().await;

        let user = svc.create(customer("ada@example.com")).await.unwrap();
        assert_ne!(user.password_hash, "hunter2");
        assert!(verify_password("hunter2", &user.password_hash));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_invalid_input() {
        let svc = service().await;

        svc.create(customer("ada@example.com")).await.unwrap();
        let err = svc.create(customer("ada@example.com")).await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::InvalidInput(ValidationError::Duplicate { field: "email", .. })
        ));
    }

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let svc = service().await;
        let created = svc.create(customer("ada@example.com")).await.unwrap();

        let auth = svc
            .authenticate("ada@example.com", "hunter2")
            .await
            .unwrap();
        assert_eq!(auth.user.id, created.id);

        let claims = JwtManager::new("test-secret", 3600)
            .validate(&auth.token)
            .unwrap();
        assert_eq!(claims.sub, created.id);
        assert_eq!(claims.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_authenticate_distinguishes_unknown_email_from_bad_password() {
        let svc = service().await;
        svc.create(customer("ada@example.com")).await.unwrap();

        let err = svc
            .authenticate("nobody@example.com", "hunter2")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));

        let err = svc
            .authenticate("ada@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let svc = service().await;
        let user = svc.create(customer("ada@example.com")).await.unwrap();

        svc.delete(&user.id).await.unwrap();

        let err = svc.get(&user.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        let err = svc.delete(&user.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
