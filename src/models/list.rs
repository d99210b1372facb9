use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A named list owned by a user. Items attach through list_items.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
}
