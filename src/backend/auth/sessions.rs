/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token issuance and validation. Tokens are
 * self-contained: the signed claim set is the whole session, there is no
 * server-side session store and no revocation list - expiry is the only
 * termination mechanism, which is why lifetimes are short.
 *
 * # Claims
 *
 * `{sub, username, name, jti, iat, exp, iss, aud}` where `sub` is the
 * account id. Signing is HS256 over the shared secret; validation checks
 * the signature, issuer, audience, and lifetime with a 30-second leeway to
 * absorb clock drift between issuer and verifier.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::server::config::{JwtSettings, CLOCK_SKEW_SECONDS};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    /// Normalized username
    pub username: String,
    /// Display name
    pub name: String,
    /// Unique token id
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

impl Claims {
    /// Parse the subject claim back into an account id
    pub fn account_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Token validation errors
///
/// Callers at the HTTP boundary collapse every variant into one generic
/// "unauthenticated" outcome; the variant only matters for the server log.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature, issuer, audience, expiry, or format failure
    #[error("token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// `iat` lies further in the future than the allowed clock skew
    #[error("token issued in the future")]
    IssuedInFuture,

    /// Token serialization failed at issuance
    #[error("token encoding failed: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

/// Token issuer and validator
///
/// Built once at startup from validated [`JwtSettings`]; immutable and safe
/// to share across request tasks. Issue and verify are pure functions of
/// the key material and the clock.
pub struct Tokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl Tokens {
    /// Create a token issuer/validator from validated settings
    pub fn new(settings: &JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.leeway = CLOCK_SKEW_SECONDS;

        Self {
            encoding: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            lifetime: Duration::minutes(settings.access_token_minutes),
        }
    }

    /// Issue a signed access token for an account
    ///
    /// # Returns
    ///
    /// The encoded token and its expiry instant.
    pub fn issue(&self, user: &User) -> Result<(String, DateTime<Utc>), TokenError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as of an explicit instant
    ///
    /// Split out from [`Tokens::issue`] so expiry behavior is testable
    /// without waiting on a real clock.
    pub fn issue_at(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), TokenError> {
        let expires_at = now + self.lifetime;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            name: user.name.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp().max(0) as u64,
            exp: expires_at.timestamp().max(0) as u64,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encoding)?;

        Ok((token, expires_at))
    }

    /// Verify a bearer token and return its claims
    ///
    /// Checks signature integrity, issuer, audience, and that the current
    /// time falls within `[iat - skew, exp + skew]`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;

        // jsonwebtoken validates exp but not iat; a token that claims to be
        // issued beyond the skew window is rejected here.
        let now = Utc::now().timestamp().max(0) as u64;
        if data.claims.iat > now + CLOCK_SKEW_SECONDS {
            return Err(TokenError::IssuedInFuture);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> JwtSettings {
        JwtSettings {
            secret: "unit-test-signing-secret".to_string(),
            issuer: "receiptshare".to_string(),
            audience: "receiptshare".to_string(),
            access_token_minutes: 15,
        }
    }

    fn test_user() -> User {
        User {
            id: 42,
            username: "bob.k".to_string(),
            name: "Bob".to_string(),
            password_hash: "$2b$12$unused".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Alter the last character of the token's signature section.
    fn tamper(token: &str) -> String {
        let mut chars: Vec<char> = token.chars().collect();
        let last = *chars.last().unwrap();
        *chars.last_mut().unwrap() = if last == 'Q' { 'A' } else { 'Q' };
        chars.into_iter().collect()
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let tokens = Tokens::new(&test_settings());
        let user = test_user();

        let (token, expires_at) = tokens.issue(&user).unwrap();
        assert!(!token.is_empty());
        assert!(expires_at > Utc::now());

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.account_id(), Some(42));
        assert_eq!(claims.username, "bob.k");
        assert_eq!(claims.name, "Bob");
        assert_eq!(claims.iss, "receiptshare");
        assert_eq!(claims.aud, "receiptshare");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_fresh_token_validates_immediately() {
        let tokens = Tokens::new(&test_settings());
        let (token, _) = tokens.issue(&test_user()).unwrap();
        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_expired_beyond_skew_fails() {
        let tokens = Tokens::new(&test_settings());
        // Issued 16 minutes ago with a 15-minute lifetime: expired 60s ago,
        // beyond the 30s leeway.
        let issued = Utc::now() - Duration::minutes(16);
        let (token, _) = tokens.issue_at(&test_user(), issued).unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_expiry_within_skew_still_validates() {
        let tokens = Tokens::new(&test_settings());
        // Expired one second ago: inside the 30s drift tolerance.
        let issued = Utc::now() - Duration::minutes(15) - Duration::seconds(1);
        let (token, _) = tokens.issue_at(&test_user(), issued).unwrap();
        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_tampered_signature_fails() {
        let tokens = Tokens::new(&test_settings());
        let (token, _) = tokens.issue(&test_user()).unwrap();
        assert!(tokens.verify(&tamper(&token)).is_err());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let tokens = Tokens::new(&test_settings());
        let (token, _) = tokens.issue(&test_user()).unwrap();

        let mut other = test_settings();
        other.secret = "a-completely-different-secret".to_string();
        assert!(Tokens::new(&other).verify(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_fails() {
        let mut settings = test_settings();
        let issuer_a = Tokens::new(&settings);
        let (token, _) = issuer_a.issue(&test_user()).unwrap();

        settings.issuer = "someone-else".to_string();
        assert!(Tokens::new(&settings).verify(&token).is_err());
    }

    #[test]
    fn test_wrong_audience_fails() {
        let mut settings = test_settings();
        let issuer_a = Tokens::new(&settings);
        let (token, _) = issuer_a.issue(&test_user()).unwrap();

        settings.audience = "another-service".to_string();
        assert!(Tokens::new(&settings).verify(&token).is_err());
    }

    #[test]
    fn test_unique_token_id_per_issue() {
        let tokens = Tokens::new(&test_settings());
        let user = test_user();
        let (a, _) = tokens.issue(&user).unwrap();
        let (b, _) = tokens.issue(&user).unwrap();
        let ca = tokens.verify(&a).unwrap();
        let cb = tokens.verify(&b).unwrap();
        assert_ne!(ca.jti, cb.jti);
    }

    #[test]
    fn test_garbage_token_fails() {
        let tokens = Tokens::new(&test_settings());
        assert!(tokens.verify("invalid.token.here").is_err());
    }
}
