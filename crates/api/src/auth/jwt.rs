//! JWT access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload. They
//! are stateless: nothing is stored server-side, so a token stays valid until
//! it expires or its user is deactivated (the auth extractor re-checks that).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use todoapp_core::types::{Timestamp, UserId};
use uuid::Uuid;

use crate::config::{parse_var, required, ConfigError};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: UserId,
    pub username: String,
    pub iss: String,
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub expiry_mins: i64,
    pub issuer: String,
    pub audience: String,
}

/// Default access token expiry in minutes.
const DEFAULT_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration through a variable lookup.
    ///
    /// | Env Var           | Required | Default       |
    /// |-------------------|----------|---------------|
    /// | `JWT_SECRET`      | **yes**  | --            |
    /// | `JWT_EXPIRY_MINS` | no       | `60`          |
    /// | `JWT_ISSUER`      | no       | `todoapp`     |
    /// | `JWT_AUDIENCE`    | no       | `todoapp-web` |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(lookup, "JWT_SECRET")?;
        let expiry_mins = parse_var(lookup, "JWT_EXPIRY_MINS", DEFAULT_EXPIRY_MINS)?;
        if expiry_mins <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_MINS",
                value: expiry_mins.to_string(),
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            secret,
            expiry_mins,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "todoapp".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "todoapp-web".into()),
        })
    }
}

/// A freshly signed token and the moment it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: UserId,
    username: &str,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + Duration::minutes(config.expiry_mins);

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedToken { token, expires_at })
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiry, issuer and audience.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
