//! Authentication service.
//!
//! Password hashing with Argon2id, stateless HS256 bearer tokens, and the
//! account lifecycle (register, login, password change, deletion).

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use bookbuddy_core::{Email, UserId};

use crate::config::ServerConfig;
use crate::db::RepositoryError;
use crate::db::users::{AccountDeletion, UserRepository};
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Default display name when registration omits one.
const DEFAULT_NAME: &str = "User";

/// Claims carried in the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    pub email: String,
    pub name: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    secret: &'a SecretString,
    token_ttl_days: i64,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, config: &'a ServerConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            secret: &config.auth_secret,
            token_ttl_days: config.token_ttl_days,
        }
    }

    /// Register a new user and issue their first token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NAME);

        let user = self
            .users
            .create(&email, &password_hash, name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Login with email and password.
    ///
    /// A wrong password bumps the account's failed-login counter before the
    /// 401; a successful login resets it. Unknown emails and non-active
    /// accounts fail identically so the response doesn't reveal which.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong
    /// or the account is not active.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active() {
            return Err(AuthError::InvalidCredentials);
        }

        if verify_password(password, &user.password_hash).is_err() {
            self.users.record_failed_login(user.id).await?;
            return Err(AuthError::InvalidCredentials);
        }

        self.users.reset_failed_logins(user.id).await?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Resolve the active user behind a token, if any.
    ///
    /// Used by `/api/auth/me`: a missing, invalid, or expired token, an
    /// unknown user, or a non-active account all yield `None` rather than an
    /// error. No side effects.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database lookup fails.
    pub async fn current_user(&self, token: &str) -> Result<Option<User>, AuthError> {
        let Ok(claims) = verify_token(token, self.secret) else {
            return Ok(None);
        };

        let user = self.users.get_by_id(UserId::new(claims.sub)).await?;
        Ok(user.filter(User::is_active))
    }

    /// Replace the user's password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the new password is too short.
    /// Returns `AuthError::Repository` if the user doesn't exist or the
    /// update fails.
    pub async fn update_password(
        &self,
        user_id: UserId,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;
        let password_hash = hash_password(new_password)?;
        self.users.update_password(user_id, &password_hash).await?;
        Ok(())
    }

    /// Delete the user's account and all attached data.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the user doesn't exist or the
    /// deletion fails.
    pub async fn delete_account(&self, user_id: UserId) -> Result<AccountDeletion, AuthError> {
        let deleted = self.users.delete_account(user_id).await?;
        Ok(deleted)
    }

    /// Sign a token for the user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if signing fails.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.as_i32(),
            email: user.email.as_str().to_owned(),
            name: user.name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::days(self.token_ttl_days)).timestamp(),
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )?;

        Ok(token)
    }
}

/// Verify a bearer token and return its claims.
///
/// Pure: checks the HS256 signature and expiry, nothing else.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` for a bad signature, expired token, or
/// malformed input.
pub fn verify_token(token: &str, secret: &SecretString) -> Result<Claims, AuthError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidToken)?;

    Ok(data.claims)
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bookbuddy_core::{AccountStatus, UserRole};

    fn test_secret() -> SecretString {
        SecretString::from("kJ8#mN2$pQ5^rT9&vW3*xZ6!bD4@fG7%")
    }

    fn sample_user() -> User {
        User {
            id: UserId::new(42),
            email: Email::parse("reader@example.com").unwrap(),
            name: "Reader".to_string(),
            password_hash: String::new(),
            role: UserRole::User,
            status: AccountStatus::Active,
            failed_login_attempts: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn issue_for_test(user: &User, secret: &SecretString, ttl_days: i64) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.as_i32(),
            email: user.email.as_str().to_owned(),
            name: user.name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::days(ttl_days)).timestamp(),
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_token_roundtrip() {
        let secret = test_secret();
        let token = issue_for_test(&sample_user(), &secret, 7);

        let claims = verify_token(&token, &secret).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "reader@example.com");
        assert_eq!(claims.name, "Reader");
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = issue_for_test(&sample_user(), &test_secret(), 7);
        let other = SecretString::from("zY1!wV4$tS7^qP0&nM3*kJ6@hG9%fD2#");

        assert!(matches!(
            verify_token(&token, &other),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = test_secret();
        let token = issue_for_test(&sample_user(), &secret, -1);

        assert!(matches!(
            verify_token(&token, &secret),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            verify_token("not-a-jwt", &test_secret()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash).is_ok());
        assert!(verify_password("hunter23", &hash).is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(matches!(
            validate_password("12345"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("123456").is_ok());
    }
}
