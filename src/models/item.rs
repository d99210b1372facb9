use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A single item owned by a user. Ownership is immutable after creation.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
}
