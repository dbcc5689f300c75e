//! User repository for database operations.

use bookbuddy_core::{AccountStatus, Email, UserId, UserRole};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::prelude::FromRow;

use super::{RepositoryError, conflict_on_unique};
use crate::models::User;

const USER_COLUMNS: &str = "id, email, name, password_hash, role, status, \
                            failed_login_attempts, created_at, updated_at";

/// Raw user row; role and status are validated when mapping to [`User`].
#[derive(FromRow)]
struct UserRow {
    id: i32,
    email: String,
    name: String,
    password_hash: String,
    role: String,
    status: String,
    failed_login_attempts: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: UserRole = row
            .role
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role: {e}")))?;
        let status: AccountStatus = row
            .status
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid status: {e}")))?;

        Ok(Self {
            id: UserId::new(row.id),
            email,
            name: row.name,
            password_hash: row.password_hash,
            role,
            status,
            failed_login_attempts: row.failed_login_attempts,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Deleted-row counts from an account deletion.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDeletion {
    pub orders: u64,
    pub reviews: u64,
    pub wishlist: u64,
    pub carts: u64,
    pub users: u64,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        name: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, name, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        row.try_into()
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row =
            sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    /// Increment the failed-login counter.
    ///
    /// The counter is bookkeeping only; nothing reads it as a lockout
    /// threshold.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn record_failed_login(&self, id: UserId) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE users \
             SET failed_login_attempts = failed_login_attempts + 1, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Reset the failed-login counter after a successful login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn reset_failed_logins(&self, id: UserId) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE users SET failed_login_attempts = 0, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Replace a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an account and everything attached to it.
    ///
    /// Removes the user's orders, reviews, wishlist entries, and cart in one
    /// transaction, then the user row itself.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_account(&self, id: UserId) -> Result<AccountDeletion, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let orders = sqlx::query("DELETE FROM orders WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let reviews = sqlx::query("DELETE FROM reviews WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let wishlist = sqlx::query("DELETE FROM wishlist WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let carts = sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let users = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if users == 0 {
            // Roll back implicitly by dropping the transaction
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(AccountDeletion {
            orders,
            reviews,
            wishlist,
            carts,
            users,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_row(role: &str, status: &str) -> UserRow {
        UserRow {
            id: 1,
            email: "reader@example.com".to_string(),
            name: "Reader".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: role.to_string(),
            status: status.to_string(),
            failed_login_attempts: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_maps_to_user() {
        let user = User::try_from(sample_row("user", "active")).unwrap();
        assert_eq!(user.id, UserId::new(1));
        assert!(user.is_active());
        assert_eq!(user.role, UserRole::User);
    }

    #[test]
    fn test_row_with_bad_role_is_corruption() {
        let result = User::try_from(sample_row("superuser", "active"));
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_row_with_bad_status_is_corruption() {
        let result = User::try_from(sample_row("user", "banned"));
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
