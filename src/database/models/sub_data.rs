use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Listing projection for sub-data under an entry: excludes the `data`
/// payload, the parent key, and the stored object key.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubDataSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubData {
    pub resource_data_entry_id: Uuid,
    pub name: String,
    pub link: Option<String>,
    #[serde(default)]
    pub data: Value,
}
