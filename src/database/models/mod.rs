pub mod data_entry;
pub mod item;
pub mod resource;
pub mod sub_data;

pub use data_entry::{DataEntrySummary, NewDataEntry};
pub use item::{ItemSummary, NewItem};
pub use resource::{NewResource, ResourceSummary};
pub use sub_data::{NewSubData, SubDataSummary};

/// Point-lookup projection for the file-retrieval routes: just the stored
/// object key and a display name.
#[derive(Debug, sqlx::FromRow)]
pub struct LinkRow {
    pub name: String,
    pub link: Option<String>,
}
