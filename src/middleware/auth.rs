use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Role};
use crate::config::SecurityConfig;
use crate::error::ApiError;

/// Roles permitted to reach a gated route. Declared at route registration,
/// immutable afterwards.
#[derive(Clone, Debug)]
pub struct AllowList(&'static [Role]);

impl AllowList {
    pub fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn permits(&self, role: Role) -> bool {
        auth::authorize(role, self.0)
    }
}

/// Per-route gate state: the allow-list plus the security configuration
/// captured at construction time, so the gate never reaches into ambient
/// state while handling a request.
#[derive(Clone, Debug)]
pub struct AccessGate {
    allowed: AllowList,
    security: &'static SecurityConfig,
}

impl AccessGate {
    pub fn new(allowed: &'static [Role], security: &'static SecurityConfig) -> Self {
        Self {
            allowed: AllowList::new(allowed),
            security,
        }
    }
}

/// Authenticated caller context attached to the request once the gate
/// has granted access.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub phone_number: String,
    pub role: Role,
}

/// Access gate: extract the bearer credential, verify it, check the role
/// against the route's allow-list, then hand off to the inner handler.
///
/// Every denial terminates only the current request. Verification failure
/// kinds are logged for diagnostics but collapse to one opaque message so
/// nothing about the verifier leaks to the caller.
pub async fn require_role(
    State(gate): State<AccessGate>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        extract_bearer_token(&headers).ok_or_else(|| ApiError::unauthorized("Token required"))?;

    let claims = auth::verify_token(token, &gate.security.jwt_secret).map_err(|e| {
        tracing::debug!("token verification failed: {}", e);
        ApiError::unauthorized("Invalid token")
    })?;

    if !gate.allowed.permits(claims.role) {
        tracing::debug!("role {} not permitted for this route", claims.role);
        return Err(ApiError::forbidden("Unauthorized"));
    }

    request.extensions_mut().insert(AuthUser {
        phone_number: claims.phone_number,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`. Returns None for
/// a missing header, a non-bearer scheme, or an empty token value.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
