use serde::Serialize;
use sqlx::FromRow;

/// Row counts across the journal tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub memories: i64,
    pub locations: i64,
    pub media_items: i64,
    pub timeline_events: i64,
}
