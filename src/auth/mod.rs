use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config;

/// Closed set of roles a credential can carry. Assigned at issuance,
/// read-only at verification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::User => write!(f, "USER"),
        }
    }
}

/// Decoded payload of a verified credential. Validated at the verification
/// boundary; never threaded through the system as untyped JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub phone_number: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Claims expiring `jwt_expiry_hours` from now, per the configured
    /// issuance policy.
    pub fn new(phone_number: String, role: Role) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;

        Self {
            phone_number,
            role,
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Verification failure kinds. The distinction exists for diagnostics only;
/// callers collapse every kind to the same opaque rejection.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    SecretMissing,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Verify a signed credential string and decode its claims.
///
/// Pure function of the token and secret: verifying the same valid token
/// twice yields identical claims. Expiry is checked with zero leeway.
pub fn verify_token(raw: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::SecretMissing);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;

    match decode::<Claims>(raw, &decoding_key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => Err(match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::Malformed(e.to_string()),
        }),
    }
}

/// Sign claims into a compact HS256 token. Issuance is external to this
/// service; signing lives here for tooling and tests.
pub fn sign_token(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::SecretMissing);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| AuthError::Signing(e.to_string()))
}

/// Membership check against a route's allow-list. An empty allow-list
/// always denies.
pub fn authorize(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}
