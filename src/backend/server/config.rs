/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration from
 * environment variables.
 *
 * # Configuration Sources
 *
 * - `JWT_SECRET` - token signing key, required, at least 16 bytes
 * - `JWT_ISSUER` / `JWT_AUDIENCE` - token issuer and audience strings
 *   (default "receiptshare")
 * - `ACCESS_TOKEN_MINUTES` - access-token lifetime (default 15)
 * - `DATABASE_URL` - PostgreSQL connection string; when unset the server
 *   runs on the in-memory store
 * - `SERVER_PORT` - listen port (default 3000)
 *
 * # Error Handling
 *
 * Configuration errors are fatal: validation happens once at startup and a
 * failed check prevents the server from starting. Requests never see a
 * half-configured token signer.
 */

use thiserror::Error;

/// Allowed clock drift between token issuer and verifier, in seconds.
pub const CLOCK_SKEW_SECONDS: u64 = 30;

/// Minimum signing-key length in bytes for HS256.
pub const MIN_SECRET_BYTES: usize = 16;

const DEFAULT_ISSUER: &str = "receiptshare";
const DEFAULT_AUDIENCE: &str = "receiptshare";
const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 15;
const DEFAULT_PORT: u16 = 3000;

/// Configuration errors, all fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `JWT_SECRET` is not set
    #[error("JWT_SECRET is not set; the server cannot sign tokens")]
    MissingSecret,

    /// `JWT_SECRET` is shorter than [`MIN_SECRET_BYTES`]
    #[error("JWT_SECRET must be at least {MIN_SECRET_BYTES} bytes (got {0})")]
    SecretTooShort(usize),

    /// A numeric setting failed to parse
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    /// `DATABASE_URL` was set but the database is unreachable or broken
    #[error("database initialization failed: {0}")]
    Database(String),
}

/// Token signing and validation settings
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// Symmetric signing key (HS256). Never logged.
    pub secret: String,
    /// Expected `iss` claim
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Access-token lifetime in minutes
    pub access_token_minutes: i64,
}

impl JwtSettings {
    /// Validate the settings
    ///
    /// The signing key must be at least [`MIN_SECRET_BYTES`] bytes and the
    /// lifetime must be positive. Called once at startup, before the
    /// listener binds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::SecretTooShort(self.secret.len()));
        }
        if self.access_token_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                name: "ACCESS_TOKEN_MINUTES",
                value: self.access_token_minutes.to_string(),
            });
        }
        Ok(())
    }
}

/// Full server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Token settings, validated
    pub jwt: JwtSettings,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Listen port
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the signing key is missing or too short,
    /// or a numeric setting does not parse. All errors are fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingSecret)?;
        let issuer =
            std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string());
        let audience =
            std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string());

        let access_token_minutes = match std::env::var("ACCESS_TOKEN_MINUTES") {
            Ok(raw) => raw.parse::<i64>().map_err(|_| ConfigError::InvalidValue {
                name: "ACCESS_TOKEN_MINUTES",
                value: raw,
            })?,
            Err(_) => DEFAULT_ACCESS_TOKEN_MINUTES,
        };

        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "SERVER_PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let jwt = JwtSettings {
            secret,
            issuer,
            audience,
            access_token_minutes,
        };
        jwt.validate()?;

        Ok(Self {
            jwt,
            database_url: std::env::var("DATABASE_URL").ok(),
            port,
        })
    }
}
