//! Query layer for the resource hierarchy. All reads are parent-key filters
//! with column-level projection; writes are plain inserts/deletes.

use uuid::Uuid;

use super::manager::{pool, DatabaseError};
use super::models::{
    DataEntrySummary, ItemSummary, LinkRow, NewDataEntry, NewItem, NewResource, NewSubData,
    ResourceSummary, SubDataSummary,
};

pub async fn distinct_languages() -> Result<Vec<String>, DatabaseError> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT lan FROM resources ORDER BY lan")
            .fetch_all(pool()?)
            .await?;
    Ok(rows.into_iter().map(|(lan,)| lan).collect())
}

pub async fn resources_by_language(lan: &str) -> Result<Vec<ResourceSummary>, DatabaseError> {
    let resources = sqlx::query_as(
        "SELECT id, lan, subject, name, created_at, updated_at
         FROM resources WHERE lan = $1 ORDER BY name",
    )
    .bind(lan)
    .fetch_all(pool()?)
    .await?;
    Ok(resources)
}

pub async fn entries_for_resource(resource_id: Uuid) -> Result<Vec<DataEntrySummary>, DatabaseError> {
    let entries = sqlx::query_as(
        "SELECT id, name, created_at, updated_at
         FROM resource_data_entries WHERE resource_id = $1 ORDER BY name",
    )
    .bind(resource_id)
    .fetch_all(pool()?)
    .await?;
    Ok(entries)
}

pub async fn sub_data_for_entry(entry_id: Uuid) -> Result<Vec<SubDataSummary>, DatabaseError> {
    let sub_data = sqlx::query_as(
        "SELECT id, name, created_at, updated_at
         FROM sub_data WHERE resource_data_entry_id = $1 ORDER BY name",
    )
    .bind(entry_id)
    .fetch_all(pool()?)
    .await?;
    Ok(sub_data)
}

pub async fn items_for_sub_data(sub_data_id: Uuid) -> Result<Vec<ItemSummary>, DatabaseError> {
    let items = sqlx::query_as(
        "SELECT id, name, data, created_at, updated_at
         FROM resource_items WHERE sub_data_id = $1 ORDER BY name",
    )
    .bind(sub_data_id)
    .fetch_all(pool()?)
    .await?;
    Ok(items)
}

pub async fn item_link(id: Uuid) -> Result<Option<LinkRow>, DatabaseError> {
    let row = sqlx::query_as("SELECT name, link FROM resource_items WHERE id = $1")
        .bind(id)
        .fetch_optional(pool()?)
        .await?;
    Ok(row)
}

pub async fn sub_data_link(id: Uuid) -> Result<Option<LinkRow>, DatabaseError> {
    let row = sqlx::query_as("SELECT name, link FROM sub_data WHERE id = $1")
        .bind(id)
        .fetch_optional(pool()?)
        .await?;
    Ok(row)
}

pub async fn insert_resource(new: &NewResource) -> Result<Uuid, DatabaseError> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO resources (lan, subject, name, data) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&new.lan)
    .bind(&new.subject)
    .bind(&new.name)
    .bind(&new.data)
    .fetch_one(pool()?)
    .await?;
    Ok(id)
}

pub async fn insert_data_entry(new: &NewDataEntry) -> Result<Uuid, DatabaseError> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO resource_data_entries (resource_id, name, data)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(new.resource_id)
    .bind(&new.name)
    .bind(&new.data)
    .fetch_one(pool()?)
    .await?;
    Ok(id)
}

pub async fn insert_sub_data(new: &NewSubData) -> Result<Uuid, DatabaseError> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO sub_data (resource_data_entry_id, name, link, data)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(new.resource_data_entry_id)
    .bind(&new.name)
    .bind(&new.link)
    .bind(&new.data)
    .fetch_one(pool()?)
    .await?;
    Ok(id)
}

pub async fn insert_item(new: &NewItem) -> Result<Uuid, DatabaseError> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO resource_items (sub_data_id, name, link, data)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(new.sub_data_id)
    .bind(&new.name)
    .bind(&new.link)
    .bind(&new.data)
    .fetch_one(pool()?)
    .await?;
    Ok(id)
}

pub async fn delete_resource(id: Uuid) -> Result<bool, DatabaseError> {
    delete_by_id("resources", id).await
}

pub async fn delete_data_entry(id: Uuid) -> Result<bool, DatabaseError> {
    delete_by_id("resource_data_entries", id).await
}

pub async fn delete_sub_data(id: Uuid) -> Result<bool, DatabaseError> {
    delete_by_id("sub_data", id).await
}

pub async fn delete_item(id: Uuid) -> Result<bool, DatabaseError> {
    delete_by_id("resource_items", id).await
}

async fn delete_by_id(table: &str, id: Uuid) -> Result<bool, DatabaseError> {
    // Table names come from the fixed call sites above, never from input.
    let sql = format!("DELETE FROM {} WHERE id = $1", table);
    let result = sqlx::query(&sql).bind(id).execute(pool()?).await?;
    Ok(result.rows_affected() > 0)
}
