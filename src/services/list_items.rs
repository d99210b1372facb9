use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{List, ListItem};
use crate::query::{PageQuery, Pagination};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListItemInput {
    pub quantity: i32,
    pub completed: bool,
    pub list_id: Uuid,
    pub item_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListItemInput {
    pub quantity: Option<i32>,
    pub completed: Option<bool>,
    pub list_id: Option<Uuid>,
    pub item_id: Option<Uuid>,
}

/// CRUD for the list/item association. Foreign references are validated by
/// the store; a dangling list or item id surfaces as a validation failure,
/// not Internal.
pub struct ListItemsService {
    pool: PgPool,
}

impl ListItemsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CreateListItemInput) -> Result<ListItem, ApiError> {
        let list_item = sqlx::query_as::<_, ListItem>(
            r#"
            INSERT INTO list_items (id, quantity, completed, list_id, item_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.quantity)
        .bind(input.completed)
        .bind(input.list_id)
        .bind(input.item_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(list_item)
    }

    /// Associations of one list, searchable by the joined item's name.
    pub async fn find_all_by_list(
        &self,
        list: &List,
        page: Pagination,
        search: Option<&str>,
    ) -> Result<Vec<ListItem>, ApiError> {
        Ok(PageQuery::new("list_items")
            .select("list_items.*")
            .join("INNER JOIN items ON items.id = list_items.item_id")
            .filter_eq("list_items.list_id", list.id)
            .search(&["items.name"], search)
            .page(page)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn find_one(&self, id: Uuid) -> Result<ListItem, ApiError> {
        sqlx::query_as::<_, ListItem>("SELECT * FROM list_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("List item with id {} not found", id)))
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateListItemInput,
    ) -> Result<ListItem, ApiError> {
        let existing = self.find_one(id).await?;

        let quantity = input.quantity.unwrap_or(existing.quantity);
        let completed = input.completed.unwrap_or(existing.completed);
        let list_id = input.list_id.unwrap_or(existing.list_id);
        let item_id = input.item_id.unwrap_or(existing.item_id);

        let list_item = sqlx::query_as::<_, ListItem>(
            r#"
            UPDATE list_items
            SET quantity = $1, completed = $2, list_id = $3, item_id = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(quantity)
        .bind(completed)
        .bind(list_id)
        .bind(item_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(list_item)
    }

    pub async fn remove(&self, id: Uuid) -> Result<ListItem, ApiError> {
        let list_item = self.find_one(id).await?;

        sqlx::query("DELETE FROM list_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(list_item)
    }

    pub async fn count_by_list(&self, list_id: Uuid) -> Result<i64, ApiError> {
        Ok(PageQuery::new("list_items")
            .filter_eq("list_id", list_id)
            .count(&self.pool)
            .await?)
    }
}
