//! Denial paths of the access gate, driven through the real router.

mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};

use resource_library_api::auth::Role;
use resource_library_api::routes;

const GATED_URI: &str = "/resource-items/link/7b7577a4-9a61-4a22-8a9c-3f6c2a8f4c11";

#[tokio::test]
async fn missing_header_is_unauthenticated() -> Result<()> {
    common::init();
    let req = common::request("GET", GATED_URI, None);
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token required");
    Ok(())
}

#[tokio::test]
async fn bare_bearer_scheme_is_unauthenticated() -> Result<()> {
    common::init();
    let req = Request::builder()
        .method("GET")
        .uri(GATED_URI)
        .header("Authorization", HeaderValue::from_static("Bearer"))
        .body(Body::empty())?;
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token required");
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthenticated() -> Result<()> {
    common::init();
    let req = Request::builder()
        .method("GET")
        .uri(GATED_URI)
        .header("Authorization", "Basic dXNlcjpwdw==")
        .body(Body::empty())?;
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token required");
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    common::init();
    let req = common::request("GET", GATED_URI, Some("not.a.token"));
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
    Ok(())
}

#[tokio::test]
async fn forged_token_is_rejected_regardless_of_claimed_role() -> Result<()> {
    common::init();
    // Signed with the wrong secret but claiming ADMIN
    let forged = common::mint_token_with_secret(Role::Admin, 3600, "attacker-secret");
    let req = common::request("GET", GATED_URI, Some(&forged));
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
    Ok(())
}

#[tokio::test]
async fn expired_admin_token_is_rejected() -> Result<()> {
    common::init();
    let expired = common::mint_token(Role::Admin, -1);
    let req = common::request("GET", GATED_URI, Some(&expired));
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
    Ok(())
}

#[tokio::test]
async fn user_role_is_forbidden_on_admin_route() -> Result<()> {
    common::init();
    let token = common::mint_token(Role::User, 3600);
    let req = common::request(
        "DELETE",
        "/resources/7b7577a4-9a61-4a22-8a9c-3f6c2a8f4c11",
        Some(&token),
    );
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Unauthorized");
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn admin_token_passes_the_gate_on_admin_route() -> Result<()> {
    common::init();
    let token = common::mint_token(Role::Admin, 3600);
    let req = common::request(
        "DELETE",
        "/resources/7b7577a4-9a61-4a22-8a9c-3f6c2a8f4c11",
        Some(&token),
    );
    let (status, _body) = common::send(routes::app(), req).await?;

    // The gate granted access; the handler then failed on the (absent)
    // database, which is a 503, never a 401/403.
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn gate_passes_then_path_validation_runs() -> Result<()> {
    common::init();
    let token = common::mint_token(Role::User, 3600);
    let req = common::request("GET", "/resource-items/link/not-a-uuid", Some(&token));
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID");
    Ok(())
}
