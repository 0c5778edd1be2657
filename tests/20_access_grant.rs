//! Grant paths of the access gate: a gated probe handler echoes the
//! identity and role the gate attached to the request.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{middleware, Extension, Json, Router};
use serde_json::{json, Value};

use resource_library_api::auth::Role;
use resource_library_api::config;
use resource_library_api::middleware::auth::{require_role, AccessGate, AuthUser};

async fn whoami(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "phoneNumber": user.phone_number,
        "role": user.role,
    }))
}

fn gated_app(allowed: &'static [Role]) -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .route_layer(middleware::from_fn_with_state(
            AccessGate::new(allowed, &config::config().security),
            require_role,
        ))
}

#[tokio::test]
async fn valid_token_reaches_handler_with_identity_attached() -> Result<()> {
    common::init();
    let token = common::mint_token(Role::User, 3600);
    let req = common::request("GET", "/whoami", Some(&token));
    let (status, body) = common::send(gated_app(&[Role::Admin, Role::User]), req).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phoneNumber"], "+15550100");
    assert_eq!(body["role"], "USER");
    Ok(())
}

#[tokio::test]
async fn admin_token_reaches_admin_only_handler() -> Result<()> {
    common::init();
    let token = common::mint_token(Role::Admin, 3600);
    let req = common::request("GET", "/whoami", Some(&token));
    let (status, body) = common::send(gated_app(&[Role::Admin]), req).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "ADMIN");
    Ok(())
}

#[tokio::test]
async fn user_token_is_forbidden_on_admin_only_handler() -> Result<()> {
    common::init();
    let token = common::mint_token(Role::User, 3600);
    let req = common::request("GET", "/whoami", Some(&token));
    let (status, body) = common::send(gated_app(&[Role::Admin]), req).await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Unauthorized");
    Ok(())
}

#[tokio::test]
async fn empty_allow_list_denies_every_role() -> Result<()> {
    common::init();
    for role in [Role::Admin, Role::User] {
        let token = common::mint_token(role, 3600);
        let req = common::request("GET", "/whoami", Some(&token));
        let (status, _body) = common::send(gated_app(&[]), req).await?;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
    Ok(())
}

#[tokio::test]
async fn granting_twice_yields_identical_identity() -> Result<()> {
    common::init();
    let token = common::mint_token(Role::User, 3600);

    let req = common::request("GET", "/whoami", Some(&token));
    let (_, first) = common::send(gated_app(&[Role::User]), req).await?;

    let req = common::request("GET", "/whoami", Some(&token));
    let (_, second) = common::send(gated_app(&[Role::User]), req).await?;

    assert_eq!(first, second);
    Ok(())
}
