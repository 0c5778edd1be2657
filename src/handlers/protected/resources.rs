//! Admin-gated writes for each collection in the hierarchy.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{NewDataEntry, NewItem, NewResource, NewSubData};
use crate::database::repository;
use crate::error::{ApiError, ApiResult};
use crate::handlers::public::resources::parse_id;

/// POST /resources
pub async fn resource_post(
    Json(new): Json<NewResource>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let id = repository::insert_resource(&new).await?;
    Ok(created(id))
}

/// DELETE /resources/:id
pub async fn resource_delete(Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    deleted(repository::delete_resource(id).await?, "Resource not found")
}

/// POST /resource-data-entries
pub async fn entry_post(
    Json(new): Json<NewDataEntry>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let id = repository::insert_data_entry(&new).await?;
    Ok(created(id))
}

/// DELETE /resource-data-entries/:id
pub async fn entry_delete(Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    deleted(
        repository::delete_data_entry(id).await?,
        "Resource data entry not found",
    )
}

/// POST /subdata
pub async fn sub_data_post(
    Json(new): Json<NewSubData>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let id = repository::insert_sub_data(&new).await?;
    Ok(created(id))
}

/// DELETE /subdata/:id
pub async fn sub_data_delete(Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    deleted(repository::delete_sub_data(id).await?, "SubData not found")
}

/// POST /resource-items
pub async fn item_post(Json(new): Json<NewItem>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let id = repository::insert_item(&new).await?;
    Ok(created(id))
}

/// DELETE /resource-items/:id
pub async fn item_delete(Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    deleted(
        repository::delete_item(id).await?,
        "Resource item not found",
    )
}

fn created(id: Uuid) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!({ "id": id })))
}

fn deleted(found: bool, missing_message: &str) -> ApiResult<Json<Value>> {
    if found {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(ApiError::not_found(missing_message))
    }
}
