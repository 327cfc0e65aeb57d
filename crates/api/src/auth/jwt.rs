//! Validation of bearer tokens issued by the external identity provider.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use slotbook_core::types::DbId;

/// JWT validation configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 secret shared with the identity provider.
    pub secret: String,
}

impl JwtConfig {
    /// Load from the `JWT_SECRET` env var, with a dev-only fallback.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
        Self { secret }
    }
}

/// Claims carried by identity-provider tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user's database id.
    pub sub: DbId,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Validate a bearer token and return its claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Sign a one-hour token for `user_id`.
///
/// The service never issues tokens in production (the identity provider
/// does); this exists for the test suite and local tooling.
pub fn generate_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp();
    encode(
        &Header::default(),
        &Claims { sub: user_id, exp },
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
