//! Request validation on the catalog routes and service liveness. These run
//! against the real router; every asserted path rejects before any database
//! work happens.

mod common;

use anyhow::Result;
use axum::http::StatusCode;

use resource_library_api::routes;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    common::init();
    let req = common::request("GET", "/health", None);
    let (status, body) = common::send(routes::app(), req).await?;

    // OK or SERVICE_UNAVAILABLE both count as a basic liveness check
    assert!(
        status == StatusCode::OK || status == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        status
    );
    assert!(body.is_object());
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    common::init();
    let req = common::request("GET", "/", None);
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Resource Library API");
    assert!(body["endpoints"].is_object());
    Ok(())
}

#[tokio::test]
async fn subjects_requires_language_param() -> Result<()> {
    common::init();
    let req = common::request("GET", "/resources/subjects", None);
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Query param \"lan\" is required and must be a string."
    );
    Ok(())
}

#[tokio::test]
async fn subjects_rejects_blank_language_param() -> Result<()> {
    common::init();
    let req = common::request("GET", "/resources/subjects?lan=%20%20", None);
    let (status, _body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn entries_rejects_malformed_parent_id() -> Result<()> {
    common::init();
    let req = common::request("GET", "/resource-data-entries/not-a-uuid", None);
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID");
    Ok(())
}

#[tokio::test]
async fn sub_data_rejects_malformed_parent_id() -> Result<()> {
    common::init();
    let req = common::request("GET", "/subdata/not-a-uuid", None);
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID");
    Ok(())
}

#[tokio::test]
async fn items_rejects_malformed_parent_id() -> Result<()> {
    common::init();
    let req = common::request("GET", "/resource-items/not-a-uuid", None);
    let (status, body) = common::send(routes::app(), req).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID");
    Ok(())
}
