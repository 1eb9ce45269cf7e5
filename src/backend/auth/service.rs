/**
 * Identity Service
 *
 * Registration and login orchestration: normalize and validate input,
 * consult the store, hash/verify the password, and mint a session token.
 * Handlers stay thin; every rule lives here where it can be tested against
 * the in-memory store.
 *
 * # Username Rules
 *
 * Usernames are normalized (trimmed, lowercased) before validation,
 * uniqueness checking, and storage, so `Alice` and `alice` are the same
 * account. Valid usernames are 3-30 characters from `[a-z0-9._]`.
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt before storage and never logged
 * - Login failure is one generic error for "no such user" and "wrong
 *   password", so usernames cannot be enumerated
 * - Registration retries cannot double-create an account: the store's
 *   uniqueness constraint backstops the service-level check
 */

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::backend::auth::password::{hash_password, verify_password};
use crate::backend::auth::sessions::Tokens;
use crate::backend::auth::users::User;
use crate::backend::error::ApiError;
use crate::backend::store::{Store, StoreError};

/// Minimum and maximum normalized username length.
pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;

/// A freshly established session, returned by register and login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Signed access token
    pub access_token: String,
    /// Token expiry instant
    pub expires_at: DateTime<Utc>,
    /// Normalized username
    pub username: String,
    /// Display name
    pub name: String,
}

/// Normalize a username: trim surrounding whitespace, lowercase.
///
/// Applied before validation, the uniqueness check, and storage.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check a normalized username against the length and charset rules.
pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_')
}

/// Identity service
///
/// Takes its collaborators as constructor parameters; nothing is read from
/// global state.
pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: Arc<Tokens>,
}

impl AuthService {
    /// Create an identity service over a store and a token issuer
    pub fn new(store: Arc<dyn Store>, tokens: Arc<Tokens>) -> Self {
        Self { store, tokens }
    }

    /// Register a new account and establish a session
    ///
    /// # Errors
    ///
    /// * `Validation` - username fails the length/charset rule, or the
    ///   password is empty
    /// * `Conflict` - the normalized username is already registered
    ///   (including case variants)
    pub async fn register(
        &self,
        username: &str,
        name: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let username = normalize_username(username);

        if !is_valid_username(&username) {
            return Err(ApiError::Validation(format!(
                "Username must be {USERNAME_MIN}-{USERNAME_MAX} characters: lowercase letters, digits, dot or underscore only."
            )));
        }

        if password.trim().is_empty() {
            return Err(ApiError::Validation(
                "Password must not be empty.".to_string(),
            ));
        }

        if self.store.user_by_username(&username).await?.is_some() {
            return Err(ApiError::Conflict("Username is already taken.".to_string()));
        }

        let password_hash = hash_password(password).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            ApiError::Internal
        })?;

        // The store's uniqueness constraint catches the race where two
        // registrations pass the check above concurrently.
        let user = match self.store.create_user(&username, name, &password_hash).await {
            Ok(user) => user,
            Err(StoreError::DuplicateUsername) => {
                return Err(ApiError::Conflict("Username is already taken.".to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = user.id, username = %user.username, "account registered");
        self.session_for(&user)
    }

    /// Authenticate an account and establish a session
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials` - unknown username or wrong password; the two
    ///   cases are deliberately indistinguishable to the caller
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let username = normalize_username(username);

        let Some(user) = self.store.user_by_username(&username).await? else {
            tracing::warn!(username = %username, "login failed: unknown username");
            return Err(ApiError::InvalidCredentials);
        };

        let valid = verify_password(&user.password_hash, password).map_err(|e| {
            // A malformed stored hash is corruption, not a wrong password.
            tracing::error!(user_id = user.id, error = %e, "stored password hash is malformed");
            ApiError::Internal
        })?;

        if !valid {
            tracing::warn!(user_id = user.id, "login failed: wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, username = %user.username, "user logged in");
        self.session_for(&user)
    }

    fn session_for(&self, user: &User) -> Result<Session, ApiError> {
        let (access_token, expires_at) = self.tokens.issue(user).map_err(|e| {
            tracing::error!(error = %e, "token issuance failed");
            ApiError::Internal
        })?;

        Ok(Session {
            access_token,
            expires_at,
            username: user.username.clone(),
            name: user.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::JwtSettings;
    use crate::backend::store::MemoryStore;

    fn service() -> AuthService {
        let settings = JwtSettings {
            secret: "service-test-secret-key".to_string(),
            issuer: "receiptshare".to_string(),
            audience: "receiptshare".to_string(),
            access_token_minutes: 15,
        };
        AuthService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(Tokens::new(&settings)),
        )
    }

    fn tokens() -> Tokens {
        let settings = JwtSettings {
            secret: "service-test-secret-key".to_string(),
            issuer: "receiptshare".to_string(),
            audience: "receiptshare".to_string(),
            access_token_minutes: 15,
        };
        Tokens::new(&settings)
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  Alice "), "alice");
        assert_eq!(normalize_username("BOB.K"), "bob.k");
    }

    #[test]
    fn test_username_rules() {
        assert!(is_valid_username("bob.k"));
        assert!(is_valid_username("a_1"));
        assert!(is_valid_username("user.name_99"));

        assert!(!is_valid_username("ab")); // too short
        assert!(!is_valid_username(&"a".repeat(31))); // too long
        assert!(!is_valid_username("Bob")); // uppercase survives only pre-normalization
        assert!(!is_valid_username("with space"));
        assert!(!is_valid_username("dash-ed"));
        assert!(!is_valid_username(""));
    }

    #[tokio::test]
    async fn test_register_then_login_same_account() {
        let svc = service();

        let registered = svc.register("Bob.K", "Bob", "Secr3t!pass").await.unwrap();
        assert_eq!(registered.username, "bob.k");
        assert_eq!(registered.name, "Bob");
        assert!(!registered.access_token.is_empty());

        let logged_in = svc.login("bob.k", "Secr3t!pass").await.unwrap();

        // Both tokens must decode to the same account id.
        let verifier = tokens();
        let reg_claims = verifier.verify(&registered.access_token).unwrap();
        let login_claims = verifier.verify(&logged_in.access_token).unwrap();
        assert_eq!(reg_claims.account_id(), login_claims.account_id());
        assert!(reg_claims.account_id().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected_case_insensitively() {
        let svc = service();
        svc.register("alice", "Alice", "password123").await.unwrap();

        let result = svc.register("Alice", "Other Alice", "password456").await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_invalid_username_rejected() {
        let svc = service();
        let result = svc.register("no spaces!", "X", "password123").await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let svc = service();
        let result = svc.register("bob.k", "Bob", "   ").await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let svc = service();
        svc.register("alice", "Alice", "password123").await.unwrap();

        let wrong_password = svc.login("alice", "wrong-password").await.unwrap_err();
        let unknown_user = svc.login("nobody", "password123").await.unwrap_err();

        // Same variant, same status, same message: no username enumeration.
        assert!(matches!(wrong_password, ApiError::InvalidCredentials));
        assert!(matches!(unknown_user, ApiError::InvalidCredentials));
        assert_eq!(wrong_password.status_code(), unknown_user.status_code());
        assert_eq!(wrong_password.message(), unknown_user.message());
    }

    #[tokio::test]
    async fn test_login_normalizes_username() {
        let svc = service();
        svc.register("alice", "Alice", "password123").await.unwrap();
        assert!(svc.login("  ALICE ", "password123").await.is_ok());
    }
}
