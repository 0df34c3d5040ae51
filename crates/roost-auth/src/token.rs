use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Issuer claim stamped into every access token.
pub const ISSUER: &str = "roost";

/// Default access-token lifetime on the login path.
pub const LOGIN_TTL_SECS: i64 = 86_400;
/// Default access-token lifetime when minted from a refresh exchange. The
/// two defaults differ on purpose; see DESIGN.md.
pub const EXCHANGE_TTL_SECS: i64 = 3_600;

const MAX_REQUESTED_TTL_SECS: i64 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign an HS256 access token for `user_id`.
///
/// TTL policy: a requested TTL strictly inside `(0, 86400)` wins; anything
/// else (zero, negative, a day and beyond) silently falls back to the call
/// site's `default_ttl` rather than being rejected.
pub fn issue_access(
    secret: &str,
    user_id: u64,
    now: i64,
    requested_ttl: i64,
    default_ttl: i64,
) -> Result<String, AuthError> {
    let ttl = if requested_ttl > 0 && requested_ttl < MAX_REQUESTED_TTL_SECS {
        requested_ttl
    } else {
        default_ttl
    };
    let claims = Claims {
        iss: ISSUER.to_owned(),
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Signing)
}

/// Validate a bearer access token and return its subject user id. Signature
/// and expiry are checked; every failure mode looks the same to the caller.
pub fn validate_access(secret: &str, token: &str) -> Result<u64, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::Unauthorized)?;
    data.claims.sub.parse().map_err(|_| AuthError::Unauthorized)
}
