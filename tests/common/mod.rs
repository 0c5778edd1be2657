#![allow(dead_code)]

use std::sync::OnceLock;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use resource_library_api::auth::{self, Claims, Role};

pub const TEST_SECRET: &str = "gate-test-secret";

/// Point the process-wide config at a known signing secret before the
/// config singleton is first touched. Safe to call from every test.
pub fn init() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        std::env::set_var("JWT_SECRET", TEST_SECRET);
    });
}

/// Mint a token signed with the test secret. Negative `ttl_secs` produces
/// an already-expired token.
pub fn mint_token(role: Role, ttl_secs: i64) -> String {
    mint_token_with_secret(role, ttl_secs, TEST_SECRET)
}

pub fn mint_token_with_secret(role: Role, ttl_secs: i64, secret: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        phone_number: "+15550100".to_string(),
        role,
        exp: now + ttl_secs,
        iat: now,
    };
    auth::sign_token(&claims, secret).expect("sign test token")
}

pub fn request(method: &str, uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("build request")
}

/// Drive a request through the router and decode the JSON body.
pub async fn send(app: axum::Router, req: Request<Body>) -> Result<(StatusCode, Value)> {
    let response: Response<Body> = app.oneshot(req).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}
