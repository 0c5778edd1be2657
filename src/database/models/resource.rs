use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Subject listing projection: the resource document minus its `data`
/// payload.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub id: Uuid,
    pub lan: String,
    pub subject: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub lan: String,
    pub subject: String,
    pub name: String,
    #[serde(default)]
    pub data: Value,
}
