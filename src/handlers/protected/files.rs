//! Gated file-retrieval routes: raw object download for resource items and
//! messaging-service upload for sub-data objects.

use axum::body::Body;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde_json::{json, Value};

use crate::database::repository;
use crate::error::{ApiError, ApiResult};
use crate::handlers::public::resources::parse_id;
use crate::storage::{self, messaging};

/// GET /resource-items/link/:id - download the stored object for an item
pub async fn item_download(Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    let item = repository::item_link(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Resource item not found"))?;
    let link = item
        .link
        .ok_or_else(|| ApiError::not_found("Resource item not found"))?;

    let bytes = storage::bridge().fetch_object(&link).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", item.name),
        )
        .body(Body::from(bytes))
        .map_err(|e| ApiError::internal_server_error(format!("failed to build response: {}", e)))
}

/// GET /subdata/link/:id - push the stored object to the messaging service
/// and return the resulting media handle
pub async fn sub_data_media(Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;

    let link = repository::sub_data_link(id)
        .await?
        .and_then(|row| row.link)
        .ok_or_else(|| ApiError::not_found("SubData not found"))?;

    let media = messaging::upload_media(&link).await?;
    Ok(Json(json!({ "media": media })))
}
