//! Public catalog listings: parent-key filtered views of the resource
//! hierarchy with field-exclusion projection.

use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::repository;
use crate::error::{ApiError, ApiResult};

/// GET /resources/languages - unique languages across the library
pub async fn languages_get() -> ApiResult<Json<Value>> {
    let languages = repository::distinct_languages().await?;
    Ok(Json(json!({ "languages": languages })))
}

#[derive(Debug, Deserialize)]
pub struct SubjectsQuery {
    pub lan: Option<String>,
}

/// GET /resources/subjects?lan= - subjects available for a language
pub async fn subjects_get(Query(query): Query<SubjectsQuery>) -> ApiResult<Json<Value>> {
    let lan = query
        .lan
        .as_deref()
        .map(str::trim)
        .filter(|lan| !lan.is_empty())
        .ok_or_else(|| {
            ApiError::bad_request("Query param \"lan\" is required and must be a string.")
        })?;

    let resources = repository::resources_by_language(lan).await?;
    Ok(Json(json!({ "resources": resources })))
}

/// GET /resource-data-entries/:resource_id - entries under a resource
pub async fn entries_get(Path(resource_id): Path<String>) -> ApiResult<Json<Value>> {
    let resource_id = parse_id(&resource_id)?;
    let entries = repository::entries_for_resource(resource_id).await?;
    Ok(Json(json!({ "entries": entries })))
}

/// GET /subdata/:resource_data_entry_id - sub-data under an entry
pub async fn sub_data_get(Path(entry_id): Path<String>) -> ApiResult<Json<Value>> {
    let entry_id = parse_id(&entry_id)?;
    let sub_data = repository::sub_data_for_entry(entry_id).await?;
    Ok(Json(json!({ "subData": sub_data })))
}

/// GET /resource-items/:sub_data_id - items under a sub-data node
pub async fn items_get(Path(sub_data_id): Path<String>) -> ApiResult<Json<Value>> {
    let sub_data_id = parse_id(&sub_data_id)?;
    let items = repository::items_for_sub_data(sub_data_id).await?;
    Ok(Json(json!({ "items": items })))
}

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid ID"))
}
