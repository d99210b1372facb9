use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Association between a list and an item, with per-pair attributes.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: Uuid,
    pub quantity: i32,
    pub completed: bool,
    pub list_id: Uuid,
    pub item_id: Uuid,
}
